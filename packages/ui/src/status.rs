//! The one place recorder states turn into user-facing copy.

use dioxus::prelude::*;

use api::RecorderState;

/// Short status line for a recorder state.
pub fn status_copy(state: RecorderState) -> &'static str {
    match state {
        RecorderState::Initializing => "Recorder is starting up",
        RecorderState::Ready => "Ready to record",
        RecorderState::Waiting => "Waiting to be let into the call",
        RecorderState::Joining => "Joining the call",
        RecorderState::Recording => "Recording in progress",
        RecorderState::Processing => "Processing the recording",
        RecorderState::Unavailable => "Recorder is unavailable",
    }
}

fn pill_classes(state: RecorderState) -> &'static str {
    match state {
        RecorderState::Ready => "bg-green-100 text-green-800",
        RecorderState::Recording => "bg-red-100 text-red-800",
        RecorderState::Waiting | RecorderState::Joining | RecorderState::Processing => {
            "bg-amber-100 text-amber-800"
        }
        RecorderState::Initializing => "bg-neutral-100 text-neutral-600",
        RecorderState::Unavailable => "bg-neutral-200 text-neutral-500",
    }
}

/// Colored badge with the state's copy.
#[component]
pub fn StatusPill(state: RecorderState) -> Element {
    rsx! {
        span {
            class: "inline-flex items-center rounded-full px-2.5 py-0.5 text-xs font-medium {pill_classes(state)}",
            "{status_copy(state)}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_state_has_distinct_copy() {
        let states = [
            RecorderState::Initializing,
            RecorderState::Ready,
            RecorderState::Waiting,
            RecorderState::Joining,
            RecorderState::Recording,
            RecorderState::Processing,
            RecorderState::Unavailable,
        ];
        let copies: std::collections::HashSet<_> =
            states.iter().map(|s| status_copy(*s)).collect();
        assert_eq!(copies.len(), states.len());
    }
}
