use dioxus::prelude::*;

/// Labeled dropdown over a fixed list of option labels
#[component]
pub fn OptionSelect(
    label: String,
    options: Vec<String>,
    value: String,
    disabled: bool,
    on_change: EventHandler<String>,
) -> Element {
    rsx! {
        div {
            class: "flex flex-col gap-1.5",
            label { class: "text-xs font-medium uppercase tracking-wider text-[var(--text-tertiary)]", "{label}" }
            select {
                class: "glass-input text-sm cursor-pointer",
                value: "{value}",
                disabled: disabled,
                onchange: move |e: FormEvent| on_change.call(e.value()),
                for option_label in options.iter() {
                    option {
                        key: "{option_label}",
                        value: "{option_label}",
                        selected: *option_label == value,
                        "{option_label}"
                    }
                }
            }
        }
    }
}

/// Labels of an option set, in display order
pub fn labels<T: std::fmt::Display>(values: &[T]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
