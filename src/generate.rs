//! 生成処理（プロンプト生成 → API呼び出し → 結果保存）

use crate::error::Result;
use lacquer_studio_common::{
    compile_prompt, decode_image, download_file_name, generate_image, DesignRecord,
    GeneratedResult, ImageResource, SessionState, Transport,
};
use std::path::{Path, PathBuf};

/// 1回の生成で得た画像とプロンプト
#[derive(Debug, Clone)]
pub struct Generation {
    pub image: ImageResource,
    pub prompt: String,
}

/// 設計レコードから画像を1枚生成する
pub async fn render_design<T: Transport>(
    transport: &T,
    model: &str,
    api_key: Option<&str>,
    record: &DesignRecord,
) -> lacquer_studio_common::Result<Generation> {
    let prompt = compile_prompt(record);
    tracing::debug!(model, prompt_len = prompt.len(), "requesting image");

    let image = generate_image(transport, model, api_key, &prompt).await?;
    tracing::info!(mime = %image.mime_type, bytes = image.data.len(), "image received");

    Ok(Generation { image, prompt })
}

/// セッション上で生成を1回実行する
///
/// 生成中なら何もせず `false`。成功・失敗どちらでも生成中フラグは必ず戻る。
pub async fn generate_in_session<T: Transport>(
    state: &mut SessionState,
    transport: &T,
    model: &str,
    api_key: Option<&str>,
    record: &DesignRecord,
) -> bool {
    let Some(ticket) = state.begin_generation() else {
        tracing::warn!("generation already in flight; ignoring request");
        return false;
    };

    let outcome = render_design(transport, model, api_key, record)
        .await
        .map(|g| state.make_result(g.image, g.prompt, now_ms()));

    if let Err(e) = &outcome {
        tracing::error!(error = %e, "image generation failed");
    }

    state.finish_generation(ticket, outcome);
    true
}

/// 結果画像を `<dir>/lacquerware-{id}.{ext}` に書き出す
pub fn save_result(result: &GeneratedResult, dir: &Path) -> Result<PathBuf> {
    let bytes = decode_image(&result.image)?;
    std::fs::create_dir_all(dir)?;

    let path = dir.join(download_file_name(result));
    std::fs::write(&path, bytes)?;
    Ok(path)
}

/// 現在時刻（UNIXミリ秒）
pub fn now_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
}
