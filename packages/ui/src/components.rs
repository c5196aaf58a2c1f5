//! Small styled primitives shared by every view.

use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Outline,
    Danger,
}

impl ButtonVariant {
    fn classes(self) -> &'static str {
        match self {
            ButtonVariant::Primary => {
                "bg-primary-600 text-white border border-primary-600 hover:bg-primary-700"
            }
            ButtonVariant::Outline => {
                "bg-white text-neutral-700 border border-neutral-300 hover:bg-neutral-50"
            }
            ButtonVariant::Danger => "bg-red-600 text-white border border-red-600 hover:bg-red-700",
        }
    }
}

#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(default)] disabled: bool,
    #[props(default)] class: String,
    #[props(default = "button".to_string())] r#type: String,
    #[props(default)] onclick: EventHandler<MouseEvent>,
    children: Element,
) -> Element {
    rsx! {
        button {
            class: "rounded px-3 py-2 text-sm font-medium cursor-pointer disabled:opacity-50 disabled:cursor-default {variant.classes()} {class}",
            disabled,
            r#type,
            onclick: move |evt| onclick.call(evt),
            {children}
        }
    }
}

#[component]
pub fn Input(
    #[props(default)] id: String,
    #[props(default)] class: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default)] placeholder: String,
    #[props(default)] disabled: bool,
    value: String,
    oninput: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        input {
            id,
            class: "bg-white border border-neutral-300 rounded px-3 py-2 text-sm text-neutral-800 outline-none font-[inherit] focus:border-primary-500 focus:shadow-[0_0_0_1px_var(--color-primary-500)] {class}",
            r#type,
            placeholder,
            disabled,
            value,
            oninput: move |evt| oninput.call(evt),
        }
    }
}

#[component]
pub fn Label(html_for: String, children: Element) -> Element {
    rsx! {
        label {
            r#for: html_for,
            class: "block text-sm font-medium text-neutral-700",
            {children}
        }
    }
}

/// Centered modal overlay. Clicking the backdrop dismisses.
#[component]
pub fn Dialog(on_dismiss: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "fixed inset-0 z-40 bg-black/40 flex items-center justify-center",
            onclick: move |_| on_dismiss.call(()),
            div {
                class: "bg-white rounded-lg shadow-xl w-full max-w-md max-h-[85vh] overflow-y-auto",
                onclick: move |evt| evt.stop_propagation(),
                {children}
            }
        }
    }
}

/// Inline error banner for form-level failures.
#[component]
pub fn ErrorNotice(message: String) -> Element {
    rsx! {
        div {
            class: "bg-red-50 border border-red-200 text-red-700 rounded px-3 py-2 text-sm",
            "{message}"
        }
    }
}
