//! 設定パネルコンポーネント
//!
//! APIキーは生成のたびにこの入力値から読む。

use leptos::prelude::*;

#[component]
pub fn SettingsPanel(
    api_key: ReadSignal<String>,
    set_api_key: WriteSignal<String>,
) -> impl IntoView {
    let has_key = move || !api_key.get().trim().is_empty();

    view! {
        <div class="settings-panel">
            <div class="form-group">
                <label for="api-key">"Gemini API Key"</label>
                <input
                    type="password"
                    id="api-key"
                    placeholder="API Keyを入力..."
                    prop:value=move || api_key.get()
                    on:input=move |ev| {
                        set_api_key.set(event_target_value(&ev));
                    }
                />
                <a
                    href="https://aistudio.google.com/app/apikey"
                    target="_blank"
                    rel="noopener noreferrer"
                    class="api-key-link"
                >
                    "APIキーを取得 →"
                </a>
                <div class="api-key-status">
                    {move || if has_key() { "設定済み" } else { "未設定" }}
                </div>
            </div>
        </div>
    }
}
