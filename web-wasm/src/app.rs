//! メインアプリケーションコンポーネント
//!
//! 設計レコードとセッション状態はここだけが所有する。
//! 子コンポーネントには読み取り用シグナルとコールバックを渡す。

use leptos::prelude::*;
use leptos::task::spawn_local;
use lacquer_studio_common::{DesignRecord, SessionState};
use crate::api::gemini::generate_design;
use crate::components::{
    header::Header,
    settings_panel::SettingsPanel,
    controls::Controls,
    preview_area::PreviewArea,
    gallery::Gallery,
};

/// ビルド時に埋め込まれたAPIキー（未設定なら空）
fn initial_api_key() -> String {
    option_env!("GEMINI_API_KEY").unwrap_or_default().to_string()
}

/// 現在時刻（UNIXミリ秒）
fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

#[component]
pub fn App() -> impl IntoView {
    // アプリケーション状態
    let (design, set_design) = signal(DesignRecord::default());
    let (session, set_session) = signal(SessionState::new());
    let (api_key, set_api_key) = signal(initial_api_key());

    let is_generating = Signal::derive(move || session.with(|s| s.is_generating));
    let last_error = move || session.with(|s| s.last_error.clone());

    let on_change = move |next: DesignRecord| set_design.set(next);

    // 生成ハンドラ（生成中は受け付けない）
    let on_generate = move |_: ()| {
        let Some(ticket) = set_session.try_update(|s| s.begin_generation()).flatten() else {
            return;
        };
        let record = design.get_untracked();
        // APIキーは押下時点の値を使う
        let key = api_key.get_untracked();

        spawn_local(async move {
            let (prompt, outcome) = generate_design(&record, &key).await;
            if let Err(e) = &outcome {
                gloo::console::error!(format!("Gemini Image Generation Error: {}", e));
                if e.is_configuration() {
                    gloo::console::warn!("Enter a Gemini API key in the settings panel");
                }
            }
            set_session.update(|s| {
                let outcome = outcome.map(|image| s.make_result(image, prompt, now_ms()));
                s.finish_generation(ticket, outcome);
            });
        });
    };

    let on_select = move |id: String| {
        set_session.update(|s| {
            s.select(&id);
        });
    };

    let on_clear = move |_: ()| set_session.update(|s| s.clear_history());

    view! {
        <div class="container">
            <Header />

            <SettingsPanel api_key=api_key set_api_key=set_api_key />

            <main class="studio">
                <section class="studio-controls">
                    <Controls
                        design=design
                        is_generating=is_generating
                        on_change=on_change
                        on_generate=on_generate
                    />
                </section>

                <section class="studio-preview">
                    {move || last_error().map(|error| view! {
                        <div class="error-banner">"Error: " {error}</div>
                    })}
                    <PreviewArea session=session />
                </section>

                <aside class="studio-gallery">
                    <Gallery session=session on_select=on_select on_clear=on_clear />
                </aside>
            </main>
        </div>
    }
}

