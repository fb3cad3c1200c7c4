//! プレビューコンポーネント
//!
//! 生成中 / 結果表示 / 空 の3状態。生成中が常に優先する。

use leptos::prelude::*;
use lacquer_studio_common::{GeneratedResult, PreviewKey, SessionState};
use crate::export::download::download_result;

#[component]
pub fn PreviewArea(session: ReadSignal<SessionState>) -> impl IntoView {
    // 表示中の結果が変わったときだけ作り直す（情報パネルの開閉を保つ）
    let preview_key = Memo::new(move |_| session.with(|s| s.preview().key()));

    view! {
        <div class="preview-area">
            {move || match preview_key.get() {
                PreviewKey::Generating => view! {
                    <div class="preview-loading">
                        <div class="spinner"></div>
                        <p>"Crafting your lacquerware..."</p>
                    </div>
                }
                .into_any(),
                PreviewKey::Showing(_) => session
                    .with_untracked(|s| s.current.clone())
                    .map(|result| view! { <ResultFigure result=result /> })
                    .into_any(),
                PreviewKey::Empty => view! {
                    <div class="preview-empty">
                        <p>
                            "The studio is ready. Adjust the parameters on the left and strike the \"Reveal Masterpiece\" button to begin your creation."
                        </p>
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}

#[component]
fn ResultFigure(result: GeneratedResult) -> impl IntoView {
    let (show_info, set_show_info) = signal(false);
    let src = result.image.data_url();
    let prompt = result.source_prompt.clone();

    let on_download = move |_| {
        if let Err(e) = download_result(&result) {
            gloo::console::error!(format!("download failed: {:?}", e));
        }
    };

    view! {
        <figure class="preview-figure">
            <img src=src alt="Generated Lacquerware" />
            <div class="preview-actions">
                <button
                    class="icon-btn"
                    title="View Details"
                    on:click=move |_| set_show_info.update(|v| *v = !*v)
                >
                    "ⓘ"
                </button>
                <button class="icon-btn" title="Download Image" on:click=on_download>
                    "⬇"
                </button>
            </div>
            <Show when=move || show_info.get()>
                <figcaption class="prompt-info">
                    <h4>"Generation Prompt"</h4>
                    <p>{prompt.clone()}</p>
                </figcaption>
            </Show>
        </figure>
    }
}
