//! Priority Selector Component
//!
//! Reusable card priority selector buttons.

use leptos::prelude::*;

use crate::models::Priority;

/// Priority options, lowest first
pub const PRIORITIES: &[(Priority, &str)] = &[
    (Priority::None, "None"),
    (Priority::Low, "Low"),
    (Priority::Medium, "Medium"),
    (Priority::High, "High"),
];

/// Priority selector buttons for cards
#[component]
pub fn PrioritySelector(
    current: Signal<Priority>,
    #[prop(into)] on_change: Callback<Priority>,
) -> impl IntoView {
    view! {
        <div class="priority-selector">
            {PRIORITIES.iter().map(|(value, label)| {
                let value = *value;
                let is_selected = move || current.get() == value;
                view! {
                    <button
                        type="button"
                        class=move || if is_selected() {
                            format!("priority-btn small active priority-{}", value.as_str())
                        } else {
                            "priority-btn small".to_string()
                        }
                        on:click=move |_| on_change.run(value)
                    >
                        {*label}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
