//! One recording in the list: title, speakers, transcript, downloads.

use dioxus::prelude::*;

use api::{ApiError, Recording};

use crate::components::{Button, ButtonVariant, ErrorNotice};
use crate::download::save_file;
use crate::icons;
use crate::Icon;
use crate::poll::{keys, use_poll_cache};
use crate::session::use_session;

/// Title shown on the card: the meeting name when the pipeline captured one,
/// otherwise a readable timestamp.
pub fn recording_title(recording: &Recording) -> String {
    match recording.meeting_name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => recording
            .created_at
            .format("Call on %B %-d, %Y at %H:%M")
            .to_string(),
    }
}

pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    let minutes = total / 60;
    let secs = total % 60;
    if minutes == 0 {
        format!("{secs}s")
    } else {
        format!("{minutes}m {secs:02}s")
    }
}

const SPEAKER_AVATARS: usize = 3;

#[component]
pub fn RecordingCard(recording: Recording) -> Element {
    let session = use_session();
    let cache = use_poll_cache();
    let mut expanded = use_signal(|| false);
    let mut download_error = use_signal(|| None::<String>);
    let mut downloading = use_signal(|| false);
    let mut deleting = use_signal(|| false);

    let can_delete = {
        let state = session.state();
        state.is_admin()
            || state
                .user()
                .is_some_and(|user| user.permissions.iter().any(|p| p.can_edit))
    };

    let speakers = recording.speakers_by_duration();
    let overflow = speakers.len().saturating_sub(SPEAKER_AVATARS);
    let shown: Vec<_> = speakers
        .iter()
        .take(SPEAKER_AVATARS)
        .map(|s| (s.name.clone(), s.profile_pic.clone()))
        .collect();

    let mut run_download = {
        let recording = recording.clone();
        move |transcript: bool| {
            if downloading() {
                return;
            }
            downloading.set(true);
            download_error.set(None);
            let client = session.client();
            let recording = recording.clone();
            spawn(async move {
                let result = if transcript {
                    fetch_and_save_transcript(&client, &recording).await
                } else {
                    fetch_and_save_audio(&client, &recording).await
                };
                if let Err(err) = result {
                    download_error.set(Some(err.to_string()));
                }
                downloading.set(false);
            });
        }
    };
    let download_audio = {
        let mut run = run_download.clone();
        move |_| run(false)
    };
    let download_transcript = move |_| run_download(true);

    let delete = {
        let id = recording.id;
        move |_| {
            if deleting() {
                return;
            }
            deleting.set(true);
            let client = session.client();
            let cache = cache.clone();
            spawn(async move {
                match client.delete_recording(id).await {
                    Ok(_) => cache.invalidate(keys::RECORDINGS),
                    Err(err) => download_error.set(Some(err.to_string())),
                }
                deleting.set(false);
            });
        }
    };

    rsx! {
        div {
            class: "bg-white border border-neutral-200 rounded-lg p-4 mb-3",
            div {
                class: "flex items-start justify-between",
                div {
                    h3 { class: "m-0 text-base font-semibold text-neutral-800", "{recording_title(&recording)}" }
                    div {
                        class: "flex items-center gap-2 mt-1 text-xs text-neutral-500",
                        span { class: "bg-neutral-100 rounded px-1.5 py-0.5", "{recording.source.label()}" }
                        if let Some(duration) = recording.duration_seconds {
                            span { "{format_duration(duration)}" }
                        }
                    }
                }
                div {
                    class: "flex items-center",
                    for (name, pic) in shown {
                        if let Some(pic) = pic {
                            img {
                                class: "w-7 h-7 rounded-full border-2 border-white -ml-1.5 first:ml-0 object-cover",
                                src: "{pic}",
                                alt: "{name}",
                                title: "{name}",
                            }
                        } else {
                            span {
                                class: "w-7 h-7 rounded-full border-2 border-white -ml-1.5 first:ml-0 bg-primary-100 text-primary-700 text-xs font-medium inline-flex items-center justify-center",
                                title: "{name}",
                                "{name.chars().next().unwrap_or('?')}"
                            }
                        }
                    }
                    if overflow > 0 {
                        span {
                            class: "w-7 h-7 rounded-full border-2 border-white -ml-1.5 bg-neutral-200 text-neutral-600 text-xs inline-flex items-center justify-center",
                            "+{overflow}"
                        }
                    }
                }
            }

            if let Some(error) = download_error() {
                div { class: "mt-3", ErrorNotice { message: error } }
            }

            div {
                class: "flex gap-2 mt-3",
                Button {
                    variant: ButtonVariant::Outline,
                    class: "inline-flex items-center gap-1.5".to_string(),
                    disabled: downloading(),
                    onclick: download_audio,
                    Icon { icon: icons::FaDownload, width: 12, height: 12 }
                    "Audio"
                }
                if recording.transcript.is_some() || recording.diarized_transcript.is_some() {
                    Button {
                        variant: ButtonVariant::Outline,
                        class: "inline-flex items-center gap-1.5".to_string(),
                        disabled: downloading(),
                        onclick: download_transcript,
                        Icon { icon: icons::FaFileLines, width: 12, height: 12 }
                        "Transcript"
                    }
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| expanded.toggle(),
                        if expanded() { "Hide transcript" } else { "Show transcript" }
                    }
                }
                if can_delete {
                    Button {
                        variant: ButtonVariant::Danger,
                        class: "ml-auto inline-flex items-center gap-1.5".to_string(),
                        disabled: deleting(),
                        onclick: delete,
                        Icon { icon: icons::FaTrashCan, width: 12, height: 12 }
                        "Delete"
                    }
                }
            }

            if expanded() {
                div {
                    class: "mt-3 border-t border-neutral-100 pt-3 text-sm text-neutral-700 max-h-64 overflow-y-auto",
                    if let Some(segments) = &recording.diarized_transcript {
                        for (i, segment) in segments.iter().enumerate() {
                            p {
                                key: "{i}",
                                class: "my-1",
                                if let Some(speaker) = &segment.speaker {
                                    span { class: "font-medium", "{speaker}: " }
                                }
                                "{segment.text}"
                            }
                        }
                    } else if let Some(transcript) = &recording.transcript {
                        p { class: "whitespace-pre-wrap my-0", "{transcript}" }
                    }
                }
            }
        }
    }
}

async fn fetch_and_save_audio(
    client: &api::ApiClient,
    recording: &Recording,
) -> Result<(), ApiError> {
    let bytes = client.download_audio(recording.id).await?;
    save_file(&recording.filename, &bytes, "audio/wav")
}

async fn fetch_and_save_transcript(
    client: &api::ApiClient,
    recording: &Recording,
) -> Result<(), ApiError> {
    let text = client.download_transcript(recording.id).await?;
    let stem = recording
        .filename
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(&recording.filename);
    save_file(&format!("{stem}.txt"), text.as_bytes(), "text/plain")
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::RecordingSource;
    use chrono::{TimeZone, Utc};

    fn recording(meeting_name: Option<&str>) -> Recording {
        Recording {
            id: 1,
            created_at: Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap(),
            source: RecordingSource::GoogleMeet,
            filename: "meet_recording_20240305.wav".into(),
            transcript: None,
            diarized_transcript: None,
            speakers: None,
            meeting_name: meeting_name.map(String::from),
            duration_seconds: None,
        }
    }

    #[test]
    fn meeting_name_wins_over_the_timestamp() {
        assert_eq!(recording_title(&recording(Some("Weekly sync"))), "Weekly sync");
        assert_eq!(
            recording_title(&recording(None)),
            "Call on March 5, 2024 at 14:30"
        );
        // Empty names fall back too.
        assert_eq!(
            recording_title(&recording(Some(""))),
            "Call on March 5, 2024 at 14:30"
        );
    }

    #[test]
    fn durations_render_compactly() {
        assert_eq!(format_duration(42.0), "42s");
        assert_eq!(format_duration(61.0), "1m 01s");
        assert_eq!(format_duration(3605.4), "60m 05s");
        assert_eq!(format_duration(-3.0), "0s");
    }
}
