//! 履歴ギャラリーコンポーネント
//!
//! 新しい順にサムネイルを並べる。履歴が空なら何も描画しない。

use leptos::prelude::*;
use wasm_bindgen::JsValue;
use lacquer_studio_common::SessionState;

#[component]
pub fn Gallery<FS, FC>(
    session: ReadSignal<SessionState>,
    on_select: FS,
    on_clear: FC,
) -> impl IntoView
where
    FS: Fn(String) + 'static + Clone + Send + Sync,
    FC: Fn(()) + 'static + Clone + Send + Sync,
{
    let has_history = move || session.with(|s| !s.history.is_empty());
    // 画像データは複製せず、IDの並びが変わったときだけ再計算する
    let history_ids = Memo::new(move |_| session.with(|s| s.history_ids()));
    let current_id = Memo::new(move |_| session.with(|s| s.current.as_ref().map(|r| r.id.clone())));

    view! {
        <Show when=has_history>
            <div class="gallery">
                <div class="gallery-header">
                    <h3>"Collection"</h3>
                    <button
                        class="btn btn-tertiary btn-small"
                        on:click={
                            let on_clear = on_clear.clone();
                            move |_| on_clear(())
                        }
                    >
                        "Clear"
                    </button>
                </div>
                <div class="gallery-grid">
                    <For
                        each=move || history_ids.get()
                        key=|id: &String| id.clone()
                        children={
                            let on_select = on_select.clone();
                            move |id: String| {
                                let on_select = on_select.clone();
                                let result = session.with_untracked(|s| s.find(&id).cloned());
                                let active_id = id.clone();
                                result.map(|result| view! {
                                    <button
                                        class=move || {
                                            if current_id.get().as_deref() == Some(active_id.as_str()) {
                                                "thumb active"
                                            } else {
                                                "thumb"
                                            }
                                        }
                                        on:click=move |_| on_select(id.clone())
                                    >
                                        <img src=result.image.data_url() alt="History item" />
                                        <span class="thumb-time">{time_label(result.created_at)}</span>
                                    </button>
                                })
                            }
                        }
                    />
                </div>
            </div>
        </Show>
    }
}

/// 作成時刻のローカル時刻表示
fn time_label(created_at: u64) -> String {
    let date = js_sys::Date::new(&JsValue::from_f64(created_at as f64));
    String::from(date.to_locale_time_string("default"))
}
