/// Popup UI for Site Tint extension

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use patternfly_yew::prelude::*;
use log::warn;
use crate::config::RedirectConfig;
use crate::host::{ChromeHost, TabHost};
use crate::operations::{change_color, inspire_me, restore_color};
use crate::storage::is_palette_color;
use crate::ui::components::ColorSelect;

#[derive(Clone, PartialEq)]
enum AppState {
    Loading,
    Idle,
    Error(String),
}

#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(|| AppState::Loading);
    let tab_url = use_state(|| None::<String>);
    let color = use_state(String::new);

    // Look up the active tab and restore its saved color on mount
    {
        let state = state.clone();
        let tab_url = tab_url.clone();
        let color = color.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                let host = ChromeHost;
                match host.active_tab_url().await {
                    Ok(url) => {
                        if let Some(saved) = restore_color(&host, &host, &url).await {
                            color.set(saved);
                        }
                        tab_url.set(Some(url));
                        state.set(AppState::Idle);
                    }
                    Err(e) => {
                        state.set(AppState::Error(format!("Failed to read the active tab: {}", e)));
                    }
                }
            });
            || ()
        });
    }

    // Dropdown handler
    let on_color_change = {
        let tab_url = tab_url.clone();
        let color = color.clone();

        Callback::from(move |selected: String| {
            let Some(url) = (*tab_url).clone() else {
                return;
            };
            if !is_palette_color(&selected) {
                return;
            }
            color.set(selected.clone());

            spawn_local(async move {
                let host = ChromeHost;
                if let Err(e) = change_color(&host, &host, &url, &selected).await {
                    warn!("Failed to save color: {}", e);
                }
            });
        })
    };

    // Redirect handler
    let on_inspire = {
        let tab_url = tab_url.clone();

        Callback::from(move |_| {
            let url = (*tab_url).clone().unwrap_or_default();

            spawn_local(async move {
                if let Err(e) = inspire_me(&ChromeHost, &url, &RedirectConfig::default()).await {
                    warn!("Failed to open tab: {}", e);
                }
            });
        })
    };

    let is_busy = !matches!(*state, AppState::Idle);

    html! {
        <div class="padding-20">
            <h1 class="popup-title">{"Site Tint"}</h1>

            {match &*state {
                AppState::Loading => html! {
                    <div class="loading-text-center">
                        <Spinner />
                    </div>
                },
                AppState::Error(err) => html! {
                    <div class="message-top-margin">
                        <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                            {err.clone()}
                        </Alert>
                    </div>
                },
                AppState::Idle => html! {}
            }}

            <div class="flex-column-gap">
                <label for="dropdown">{"Background color for this page"}</label>
                <ColorSelect
                    selected={(*color).clone()}
                    on_change={on_color_change}
                    disabled={is_busy}
                />
                <Button onclick={on_inspire} variant={ButtonVariant::Secondary} block={true}>
                    {"✨ Inspire Me"}
                </Button>
            </div>

            <p class="footer-popup">
                {"Site Tint v0.1.0"}
            </p>
        </div>
    }
}
