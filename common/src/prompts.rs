//! プロンプト生成モジュール
//!
//! 設計レコードを画像生成用の英文プロンプトに変換する。
//! 節の順序は固定: 器型 → 下地 → 文様と技法 → 加飾 → 詳細 → 固定の演出指示

use crate::types::DesignRecord;

/// レコードに依存しない演出指示（照明・背景・画風）
pub const STYLE_DIRECTIVES: &[&str] = &[
    "Lighting: Soft studio lighting emphasizing the glossy texture of the lacquer and the reflection of the gold/inlay details.",
    "Background: Dark, neutral, elegant mood.",
    "Style: Masterpiece, traditional craftsmanship, detailed macro photography, 8k resolution.",
];

/// 設計レコードからプロンプトを生成
///
/// 同じレコードからは常に同じ文字列を返す。`detail_text` が空白のみの場合は
/// 詳細の節を出力しない。
pub fn compile_prompt(record: &DesignRecord) -> String {
    let mut clauses = vec![
        format!(
            "A high-quality, photorealistic close-up studio shot of a traditional exquisite lacquerware {}.",
            record.shape
        ),
        format!("Base material: High gloss {}.", record.base_material),
        format!("Main Motif: {} painted in {}.", record.motif, record.technique),
        format!("Decorative details: {}.", record.decoration),
    ];

    if !record.detail_text.trim().is_empty() {
        clauses.push(format!("Specific details: {}.", record.detail_text));
    }

    clauses.extend(STYLE_DIRECTIVES.iter().map(|s| s.to_string()));
    clauses.join("\n")
}
