//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <div class="brand">
                <span class="brand-mark">"漆"</span>
                <h1>"LACQUERWARE " <span class="brand-accent">"STUDIO"</span></h1>
            </div>
            <div class="header-note">"Gemini 2.5 Powered Craftsmanship"</div>
        </header>
    }
}
