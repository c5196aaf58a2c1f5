//! Record-a-call dialog and its form state machine.
//!
//! The recorder is a shared, single-slot resource, so the dialog is driven by
//! the polled recorder state rather than by local assumptions: submission is
//! possible only while the recorder reports `Ready`, and the form wipes itself
//! exactly once when the recorder comes back to `Ready` after a run, so the
//! previous link and acceptance notice never bleed into the next request.

use dioxus::prelude::*;

use api::{validate_meet_url, RecorderState};

use crate::components::{Button, ButtonVariant, Dialog, ErrorNotice, Input, Label};
use crate::poll::{keys, use_poll, use_poll_cache, PollOptions};
use crate::session::use_session;
use crate::status::{status_copy, StatusPill};

/// Pure form machine, fed one observed recorder state per poll tick.
#[derive(Clone, PartialEq, Default)]
pub struct RecordCallForm {
    pub meet_link: String,
    pub submitted: bool,
    pub error: Option<String>,
    pub last_status: Option<RecorderState>,
}

impl RecordCallForm {
    /// Record a polled state. Returns whether the transient fields were reset,
    /// which happens only on the transition into `Ready` from a different
    /// known state. The very first observation never resets: a dialog opened
    /// while the recorder is already `Ready` keeps whatever was typed.
    pub fn observe(&mut self, status: RecorderState) -> bool {
        let entered_ready = status == RecorderState::Ready
            && self
                .last_status
                .is_some_and(|prev| prev != RecorderState::Ready);
        self.last_status = Some(status);
        if entered_ready {
            self.meet_link.clear();
            self.submitted = false;
            self.error = None;
        }
        entered_ready
    }

    pub fn can_submit(&self) -> bool {
        self.last_status
            .is_some_and(|status| status.accepts_submission())
            && !self.submitted
    }
}

#[component]
pub fn RecordCallDialog(on_dismiss: EventHandler<()>) -> Element {
    let session = use_session();
    let mut form = use_signal(RecordCallForm::default);

    let status = use_poll(
        Some(keys::RECORDER_STATE),
        PollOptions::interval(keys::RECORDER_STATE_INTERVAL_MS),
        {
            let client = session.client();
            move || {
                let client = client.clone();
                async move { client.recorder_state().await }
            }
        },
    );

    // Feed each polled state into the machine. The guard keeps the effect
    // from re-writing (and thus re-running) when nothing changed.
    let cache = use_poll_cache();
    use_effect(move || {
        cache.track();
        let snapshot = cache.read::<RecorderState>(keys::RECORDER_STATE);
        if let Some(state) = snapshot.data.map(|rc| *rc) {
            if form.peek().last_status != Some(state) {
                form.write().observe(state);
            }
        }
    });

    let submit = move |_| {
        let link = form.peek().meet_link.trim().to_string();
        if !form.peek().can_submit() {
            return;
        }
        if let Err(err) = validate_meet_url(&link) {
            form.write().error = Some(err.to_string());
            return;
        }
        form.write().error = None;
        let client = session.client();
        spawn(async move {
            match client.start_recording(&link).await {
                Ok(()) => form.write().submitted = true,
                Err(err) => form.write().error = Some(err.to_string()),
            }
        });
    };

    let current = form();
    let recorder_state = status.data.map(|rc| *rc);

    rsx! {
        Dialog {
            on_dismiss,
            div {
                class: "p-6",
                div {
                    class: "flex items-center justify-between mb-5",
                    h2 { class: "m-0 text-lg font-semibold text-neutral-800", "Record a call" }
                    if let Some(state) = recorder_state {
                        StatusPill { state }
                    }
                }

                if current.submitted {
                    div {
                        class: "bg-green-50 border border-green-200 text-green-800 rounded px-3 py-2 text-sm mb-4",
                        "Request accepted. The recording bot will join the call shortly; "
                        "watch the status above for progress."
                    }
                }

                div {
                    class: "mb-4",
                    Label { html_for: "meet-link", "Google Meet link" }
                    Input {
                        id: "meet-link",
                        class: "w-full mt-1.5",
                        placeholder: "https://meet.google.com/abc-defg-hij",
                        value: current.meet_link.clone(),
                        disabled: !current.can_submit(),
                        oninput: move |evt: FormEvent| form.write().meet_link = evt.value(),
                    }
                }

                if let Some(error) = &current.error {
                    div { class: "mb-4", ErrorNotice { message: error.clone() } }
                }

                if let Some(state) = recorder_state {
                    if !state.accepts_submission() {
                        p {
                            class: "text-sm text-neutral-500 mb-4",
                            "{status_copy(state)}. New requests open up once the recorder is ready."
                        }
                    }
                }

                div {
                    class: "flex gap-2 mt-5",
                    Button {
                        variant: ButtonVariant::Primary,
                        disabled: !current.can_submit(),
                        onclick: submit,
                        "Start recording"
                    }
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_dismiss.call(()),
                        "Close"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dirty_form() -> RecordCallForm {
        RecordCallForm {
            meet_link: "https://meet.google.com/abc-defg-hij".into(),
            submitted: true,
            error: Some("old".into()),
            last_status: Some(RecorderState::Processing),
        }
    }

    #[test]
    fn fields_reset_exactly_once_on_entering_ready() {
        let mut form = dirty_form();

        assert!(form.observe(RecorderState::Ready));
        assert!(form.meet_link.is_empty());
        assert!(!form.submitted);
        assert!(form.error.is_none());

        // Subsequent Ready ticks must not wipe fresh input.
        form.meet_link = "https://meet.google.com/new-link".into();
        assert!(!form.observe(RecorderState::Ready));
        assert_eq!(form.meet_link, "https://meet.google.com/new-link");
    }

    #[test]
    fn first_observation_never_resets() {
        let mut form = RecordCallForm {
            meet_link: "typed before status arrived".into(),
            ..RecordCallForm::default()
        };
        assert!(!form.observe(RecorderState::Ready));
        assert_eq!(form.meet_link, "typed before status arrived");
    }

    #[test]
    fn only_ready_accepts_submission() {
        let mut form = RecordCallForm::default();
        for state in [
            RecorderState::Initializing,
            RecorderState::Waiting,
            RecorderState::Joining,
            RecorderState::Recording,
            RecorderState::Processing,
            RecorderState::Unavailable,
        ] {
            form.observe(state);
            assert!(!form.can_submit(), "{state:?} must not accept submission");
        }
        form.observe(RecorderState::Ready);
        assert!(form.can_submit());
    }

    #[test]
    fn submission_blocks_until_the_next_cycle() {
        let mut form = RecordCallForm::default();
        form.observe(RecorderState::Ready);
        form.submitted = true;
        assert!(!form.can_submit());

        // Recorder goes through a run and returns to Ready: form reopens.
        form.observe(RecorderState::Joining);
        form.observe(RecorderState::Recording);
        form.observe(RecorderState::Processing);
        assert!(form.observe(RecorderState::Ready));
        assert!(form.can_submit());
    }
}
