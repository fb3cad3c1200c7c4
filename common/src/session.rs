//! セッション状態
//!
//! 現在の結果・履歴・生成中フラグ・最後のエラーをまとめて保持する。
//! 永続化はしない。履歴は新しい順で上限なし。

use crate::error::Error;
use crate::types::{GeneratedResult, ImageResource};

/// 生成リクエストの受付票
///
/// `begin_generation` が発行し、`finish_generation` に渡す。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// 画面に表示する状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub current: Option<GeneratedResult>,
    pub history: Vec<GeneratedResult>,
    pub is_generating: bool,
    pub last_error: Option<String>,
    latest_request: u64,
    last_id_ms: u64,
}

/// プレビュー領域の表示状態
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewState<'a> {
    Generating,
    Showing(&'a GeneratedResult),
    Empty,
}

/// 表示の切り替え単位（画像データを持たないので比較が安い）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewKey {
    Generating,
    Showing(String),
    Empty,
}

impl PreviewState<'_> {
    pub fn key(&self) -> PreviewKey {
        match self {
            PreviewState::Generating => PreviewKey::Generating,
            PreviewState::Showing(result) => PreviewKey::Showing(result.id.clone()),
            PreviewState::Empty => PreviewKey::Empty,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 生成を開始する
    ///
    /// 生成中なら何もせず `None`。
    pub fn begin_generation(&mut self) -> Option<RequestTicket> {
        if self.is_generating {
            return None;
        }
        self.is_generating = true;
        self.last_error = None;
        self.latest_request += 1;
        Some(RequestTicket(self.latest_request))
    }

    /// 生成を終了する（成功・失敗どちらでも必ず呼ぶ）
    ///
    /// 最新でない受付票の結果は捨てて `false` を返す。
    pub fn finish_generation(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<GeneratedResult, Error>,
    ) -> bool {
        if ticket.0 != self.latest_request {
            return false;
        }
        self.is_generating = false;

        match outcome {
            Ok(result) => {
                self.history.insert(0, result.clone());
                self.current = Some(result);
            }
            Err(error) => {
                self.last_error = Some(error.to_string());
            }
        }
        true
    }

    /// 履歴のID一覧（新しい順）
    pub fn history_ids(&self) -> Vec<String> {
        self.history.iter().map(|r| r.id.clone()).collect()
    }

    pub fn find(&self, id: &str) -> Option<&GeneratedResult> {
        self.history.iter().find(|r| r.id == id)
    }

    /// 履歴から結果を選ぶ（履歴は変更しない）
    pub fn select(&mut self, id: &str) -> bool {
        match self.find(id) {
            Some(result) => {
                self.current = Some(result.clone());
                true
            }
            None => false,
        }
    }

    /// 履歴を空にする（現在の結果は残す）
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn preview(&self) -> PreviewState<'_> {
        if self.is_generating {
            PreviewState::Generating
        } else if let Some(result) = &self.current {
            PreviewState::Showing(result)
        } else {
            PreviewState::Empty
        }
    }

    /// 生成結果のIDを払い出す（作成時刻ミリ秒、同一時刻なら繰り上げ）
    pub fn next_result_id(&mut self, now_ms: u64) -> String {
        let id_ms = now_ms.max(self.last_id_ms + 1);
        self.last_id_ms = id_ms;
        id_ms.to_string()
    }

    /// 生成済み画像から結果を組み立てる
    pub fn make_result(&mut self, image: ImageResource, source_prompt: String, now_ms: u64) -> GeneratedResult {
        GeneratedResult {
            id: self.next_result_id(now_ms),
            image,
            source_prompt,
            created_at: now_ms,
        }
    }
}
