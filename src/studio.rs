//! 対話式スタジオ
//!
//! フォーム編集・生成・履歴の選択/削除・ダウンロードを1セッション内で繰り返す。
//! セッション状態はこのループだけが所有する。

use crate::config::{self, Config};
use crate::error::Result;
use crate::generate::{generate_in_session, save_result};
use crate::transport::ReqwestTransport;
use chrono::{Local, TimeZone};
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use lacquer_studio_common::{
    compile_prompt, DesignRecord, GeneratedResult, PreviewState, SessionState, Vocabulary,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// メニュー操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudioAction {
    EditMaterial,
    EditMotif,
    EditTechnique,
    EditDecoration,
    EditShape,
    EditDetail,
    ShowPrompt,
    Generate,
    History,
    Download,
    ClearHistory,
    Quit,
}

impl StudioAction {
    pub const ALL: &'static [StudioAction] = &[
        StudioAction::EditMaterial,
        StudioAction::EditMotif,
        StudioAction::EditTechnique,
        StudioAction::EditDecoration,
        StudioAction::EditShape,
        StudioAction::EditDetail,
        StudioAction::ShowPrompt,
        StudioAction::Generate,
        StudioAction::History,
        StudioAction::Download,
        StudioAction::ClearHistory,
        StudioAction::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StudioAction::EditMaterial => "Base Lacquer (底色)",
            StudioAction::EditMotif => "Main Motif (纹样)",
            StudioAction::EditTechnique => "Technique (技法)",
            StudioAction::EditDecoration => "Embellishments (装饰)",
            StudioAction::EditShape => "Vessel Shape (器型)",
            StudioAction::EditDetail => "Specific Description",
            StudioAction::ShowPrompt => "Show prompt",
            StudioAction::Generate => "REVEAL MASTERPIECE",
            StudioAction::History => "Collection",
            StudioAction::Download => "Download current image",
            StudioAction::ClearHistory => "Clear collection",
            StudioAction::Quit => "Quit",
        }
    }
}

/// 対話ループ
pub async fn run_studio(output_dir: &Path) -> Result<()> {
    let config = Config::from_env();
    let transport = ReqwestTransport::new();
    let mut design = DesignRecord::default();
    let mut state = SessionState::new();

    println!("🏺 lacquer-studio - スタジオ\n");
    if !config.has_api_key() {
        println!("⚠ GEMINI_API_KEY が未設定です（生成時にエラーになります）\n");
    }

    loop {
        println!("{}", describe_design(&design));
        println!("{}\n", describe_preview(&state));
        if let Some(error) = &state.last_error {
            println!("✘ Error: {}\n", error);
        }

        let labels: Vec<&str> = StudioAction::ALL.iter().map(|a| a.label()).collect();
        let choice = Select::new()
            .with_prompt("操作を選択")
            .items(&labels)
            .default(7)
            .interact()?;

        match StudioAction::ALL[choice] {
            StudioAction::EditMaterial => {
                design = design.with_base_material(choose(design.base_material, "Base Lacquer (底色)")?);
            }
            StudioAction::EditMotif => {
                design = design.with_motif(choose(design.motif, "Main Motif (纹样)")?);
            }
            StudioAction::EditTechnique => {
                let technique = edit_text("Technique (技法)", &design.technique)?;
                design = design.with_technique(technique);
            }
            StudioAction::EditDecoration => {
                design = design.with_decoration(choose(design.decoration, "Embellishments (装饰)")?);
            }
            StudioAction::EditShape => {
                design = design.with_shape(choose(design.shape, "Vessel Shape (器型)")?);
            }
            StudioAction::EditDetail => {
                let detail = edit_text("Specific Description", &design.detail_text)?;
                design = design.with_detail_text(detail);
            }
            StudioAction::ShowPrompt => {
                println!("\n{}\n", compile_prompt(&design));
            }
            StudioAction::Generate => {
                let spinner = crafting_spinner();
                // APIキーは生成のたびに読み直す
                let api_key = config::current_api_key();
                generate_in_session(&mut state, &transport, &config.model, api_key.as_deref(), &design)
                    .await;
                spinner.finish_and_clear();
            }
            StudioAction::History => {
                pick_from_history(&mut state)?;
            }
            StudioAction::Download => match download_current(&state, output_dir) {
                Ok(Some(path)) => println!("✔ 保存しました: {}\n", path.display()),
                Ok(None) => println!("保存する画像がありません\n"),
                Err(e) => {
                    tracing::error!(error = %e, dir = %output_dir.display(), "save failed");
                    println!("✘ 保存に失敗しました: {}\n", e);
                }
            },
            StudioAction::ClearHistory => {
                state.clear_history();
                println!("✔ コレクションを削除しました\n");
            }
            StudioAction::Quit => break,
        }
    }

    Ok(())
}

/// 現在の画像を書き出す（画像が無ければ `None`）
///
/// 失敗してもセッション状態には触れない。
pub fn download_current(state: &SessionState, dir: &Path) -> Result<Option<PathBuf>> {
    state
        .current
        .as_ref()
        .map(|result| save_result(result, dir))
        .transpose()
}

/// 現在の設計の要約
pub fn describe_design(design: &DesignRecord) -> String {
    format!(
        "[{} / {} / {} / {} / {}]",
        design.shape.name(),
        design.base_material.name(),
        design.motif.name(),
        design.technique,
        design.decoration.name()
    )
}

/// プレビュー領域に相当する表示
pub fn describe_preview(state: &SessionState) -> String {
    match state.preview() {
        PreviewState::Generating => "CRAFTING...".to_string(),
        PreviewState::Showing(result) => format!(
            "現在の画像: {} ({}, {})  履歴 {}件",
            result.id,
            result.image.mime_type,
            time_label(result),
            state.history.len()
        ),
        PreviewState::Empty => "The studio is ready.".to_string(),
    }
}

/// 履歴一覧の表示ラベル（新しい順）
pub fn history_labels(history: &[GeneratedResult]) -> Vec<String> {
    history
        .iter()
        .map(|r| format!("{}  {}", time_label(r), r.id))
        .collect()
}

fn time_label(result: &GeneratedResult) -> String {
    i64::try_from(result.created_at)
        .ok()
        .and_then(|ms| Local.timestamp_millis_opt(ms).single())
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}

fn choose<V: Vocabulary>(current: V, prompt: &str) -> Result<V> {
    let labels: Vec<&str> = V::ALL.iter().map(|v| v.label()).collect();
    let default = V::ALL.iter().position(|v| *v == current).unwrap_or(0);
    let index = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(V::ALL[index])
}

fn edit_text(prompt: &str, current: &str) -> Result<String> {
    let text: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    Ok(text)
}

fn pick_from_history(state: &mut SessionState) -> Result<()> {
    if state.history.is_empty() {
        println!("コレクションは空です\n");
        return Ok(());
    }

    let labels = history_labels(&state.history);
    let index = Select::new()
        .with_prompt("Collection")
        .items(&labels)
        .default(0)
        .interact()?;

    let id = state.history[index].id.clone();
    state.select(&id);
    Ok(())
}

fn crafting_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("CRAFTING...");
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
