//! Six single-digit inputs bound to an OTP buffer. The component only reports
//! raw keyboard and clipboard events; the buffer decides what is accepted and
//! which slot holds focus, and the inputs follow it.

use crate::features::otp::{OTP_LENGTH, OtpEvent};
use leptos::{
    ev::{ClipboardEvent, KeyboardEvent},
    html,
    prelude::*,
};

#[component]
pub fn OtpInputs(
    #[prop(into)] slots: Signal<[String; OTP_LENGTH]>,
    #[prop(into)] focus: Signal<usize>,
    #[prop(into)] disabled: Signal<bool>,
    #[prop(into)] on_event: Callback<OtpEvent>,
) -> impl IntoView {
    let refs: [NodeRef<html::Input>; OTP_LENGTH] = std::array::from_fn(|_| NodeRef::new());

    Effect::new(move |_| {
        let index = focus.get();
        if let Some(input) = refs.get(index).and_then(|node| node.get()) {
            let _ = input.focus();
        }
    });

    let inputs = (0..OTP_LENGTH)
        .map(|index| {
            view! {
                <input
                    node_ref=refs[index]
                    type="text"
                    inputmode="numeric"
                    autocomplete="one-time-code"
                    maxlength="1"
                    aria-label=format!("Digit {}", index + 1)
                    class="h-14 w-12 rounded-lg border border-gray-600 bg-gray-800 text-center text-2xl font-semibold text-white focus:border-indigo-500 focus:outline-none focus:ring-2 focus:ring-indigo-500"
                    prop:value=move || slots.with(|slots| slots[index].clone())
                    disabled=move || disabled.get()
                    on:input=move |event| {
                        on_event.run(OtpEvent::Input {
                            index,
                            value: event_target_value(&event),
                        });
                    }
                    on:keydown=move |event: KeyboardEvent| {
                        if event.key() == "Backspace" {
                            on_event.run(OtpEvent::Backspace { index });
                        }
                    }
                    on:paste=move |event: ClipboardEvent| {
                        event.prevent_default();
                        let text = event
                            .clipboard_data()
                            .and_then(|data| data.get_data("text").ok())
                            .unwrap_or_default();
                        on_event.run(OtpEvent::Paste(text));
                    }
                />
            }
        })
        .collect_view();

    view! { <div class="flex justify-center gap-2 sm:gap-3">{inputs}</div> }
}
