//! 設計フォームコンポーネント
//!
//! 変更のたびに1フィールドだけ差し替えたレコードを `on_change` に渡す。

use leptos::prelude::*;
use lacquer_studio_common::{
    BaseMaterial, Decoration, DesignRecord, Motif, VesselShape, Vocabulary,
};

#[component]
pub fn Controls<FC, FG>(
    design: ReadSignal<DesignRecord>,
    is_generating: Signal<bool>,
    on_change: FC,
    on_generate: FG,
) -> impl IntoView
where
    FC: Fn(DesignRecord) + 'static + Clone + Send + Sync,
    FG: Fn(()) + 'static + Clone + Send + Sync,
{
    let pick_material = {
        let on_change = on_change.clone();
        move |m: BaseMaterial| on_change(design.get_untracked().with_base_material(m))
    };
    let pick_motif = {
        let on_change = on_change.clone();
        move |m: Motif| on_change(design.get_untracked().with_motif(m))
    };
    let pick_decoration = {
        let on_change = on_change.clone();
        move |d: Decoration| on_change(design.get_untracked().with_decoration(d))
    };
    let pick_shape = {
        let on_change = on_change.clone();
        move |s: VesselShape| on_change(design.get_untracked().with_shape(s))
    };
    let edit_technique = {
        let on_change = on_change.clone();
        move |ev: web_sys::Event| on_change(design.get_untracked().with_technique(event_target_value(&ev)))
    };
    let edit_detail = {
        let on_change = on_change.clone();
        move |ev: web_sys::Event| on_change(design.get_untracked().with_detail_text(event_target_value(&ev)))
    };

    view! {
        <div class="controls">
            <h2 class="controls-title">"Crafting Bench"</h2>

            <div class="form-group">
                <label>"Base Lacquer (底色)"</label>
                <ChoiceButtons
                    options=BaseMaterial::ALL
                    selected=Signal::derive(move || design.with(|d| d.base_material))
                    on_pick=pick_material
                />
            </div>

            <div class="form-group">
                <label for="motif">"Main Motif (纹样)"</label>
                <ChoiceSelect
                    id="motif"
                    options=Motif::ALL
                    selected=Signal::derive(move || design.with(|d| d.motif))
                    on_pick=pick_motif
                />
            </div>

            <div class="form-group">
                <label for="technique">"Technique (技法)"</label>
                <input
                    type="text"
                    id="technique"
                    prop:value=move || design.with(|d| d.technique.clone())
                    on:input=edit_technique
                />
            </div>

            <div class="form-group">
                <label>"Embellishments (装饰)"</label>
                <ChoiceButtons
                    options=Decoration::ALL
                    selected=Signal::derive(move || design.with(|d| d.decoration))
                    on_pick=pick_decoration
                />
            </div>

            <div class="form-group">
                <label for="shape">"Vessel Shape (器型)"</label>
                <ChoiceSelect
                    id="shape"
                    options=VesselShape::ALL
                    selected=Signal::derive(move || design.with(|d| d.shape))
                    on_pick=pick_shape
                />
            </div>

            <div class="form-group">
                <label for="detail">"Specific Description"</label>
                <textarea
                    id="detail"
                    rows="5"
                    placeholder="Describe specific details like 'scroll grass patterns', 'faint mother of pearl dots'..."
                    prop:value=move || design.with(|d| d.detail_text.clone())
                    on:input=edit_detail
                />
            </div>

            <button
                class=move || if is_generating.get() { "btn btn-generate is-busy" } else { "btn btn-generate" }
                disabled=move || is_generating.get()
                on:click=move |_| on_generate(())
            >
                {move || if is_generating.get() { "CRAFTING..." } else { "REVEAL MASTERPIECE" }}
            </button>
        </div>
    }
}

/// 排他的なボタン群（語彙の全選択肢を表示）
#[component]
fn ChoiceButtons<V, F>(
    options: &'static [V],
    selected: Signal<V>,
    on_pick: F,
) -> impl IntoView
where
    V: Vocabulary + Send + Sync,
    F: Fn(V) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="choice-grid">
            {options
                .iter()
                .copied()
                .map(|option| {
                    let on_pick = on_pick.clone();
                    view! {
                        <button
                            type="button"
                            class=move || if selected.get() == option { "choice active" } else { "choice" }
                            on:click=move |_| on_pick(option)
                        >
                            {option.label()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// ドロップダウン（value には key を使う）
#[component]
fn ChoiceSelect<V, F>(
    id: &'static str,
    options: &'static [V],
    selected: Signal<V>,
    on_pick: F,
) -> impl IntoView
where
    V: Vocabulary + Send + Sync,
    F: Fn(V) + 'static + Clone + Send + Sync,
{
    view! {
        <select
            id=id
            on:change=move |ev| {
                if let Some(choice) = V::parse_choice(&event_target_value(&ev)) {
                    on_pick(choice);
                }
            }
        >
            {options
                .iter()
                .copied()
                .map(|option| {
                    view! {
                        <option value=option.key() selected=move || selected.get() == option>
                            {option.label()}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}
