//! 設計レコードと生成結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - BaseMaterial / Motif / Decoration / VesselShape: 選択肢が固定の語彙
//! - DesignRecord: フォームが編集する設計一式
//! - ImageResource: そのまま表示できる画像（Data URL）
//! - GeneratedResult: 1回の生成結果

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 固定語彙の共通インターフェース
///
/// `ALL` はフォームの選択肢の表示順。
pub trait Vocabulary: Copy + Eq + Sized + 'static {
    const ALL: &'static [Self];

    /// 表示ラベル（例: "Black Lacquer (黑漆)"）
    fn label(&self) -> &'static str;

    /// CLI引数・HTMLのvalueに使う識別子
    fn key(&self) -> &'static str;

    /// 括弧書きを除いた英語名
    fn name(&self) -> &'static str {
        let label = self.label();
        label.split(" (").next().unwrap_or(label)
    }

    /// key / ラベル / 英語名のいずれかから選択肢を引く（大文字小文字は無視）
    fn parse_choice(input: &str) -> Option<Self> {
        let needle = input.trim().to_lowercase();
        Self::ALL.iter().copied().find(|v| {
            v.key() == needle
                || v.label().to_lowercase() == needle
                || v.name().to_lowercase() == needle
        })
    }
}

fn unknown_choice<V: Vocabulary>(kind: &str, input: &str) -> String {
    let keys = V::ALL.iter().map(|v| v.key()).collect::<Vec<_>>().join(", ");
    format!("Unknown {}: {}. Use one of: {}", kind, input, keys)
}

/// 下地の漆色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BaseMaterial {
    #[default]
    Black,
    Vermilion,
    DarkGreen,
    Amber,
}

impl Vocabulary for BaseMaterial {
    const ALL: &'static [Self] = &[
        BaseMaterial::Black,
        BaseMaterial::Vermilion,
        BaseMaterial::DarkGreen,
        BaseMaterial::Amber,
    ];

    fn label(&self) -> &'static str {
        match self {
            BaseMaterial::Black => "Black Lacquer (黑漆)",
            BaseMaterial::Vermilion => "Vermilion (朱漆)",
            BaseMaterial::DarkGreen => "Dark Green (绿沉)",
            BaseMaterial::Amber => "Amber (褐漆)",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            BaseMaterial::Black => "black",
            BaseMaterial::Vermilion => "vermilion",
            BaseMaterial::DarkGreen => "dark-green",
            BaseMaterial::Amber => "amber",
        }
    }
}

/// 主文様
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Motif {
    #[default]
    Orchid,
    PlumBlossom,
    Bamboo,
    Chrysanthemum,
    Pine,
    Crane,
}

impl Vocabulary for Motif {
    const ALL: &'static [Self] = &[
        Motif::Orchid,
        Motif::PlumBlossom,
        Motif::Bamboo,
        Motif::Chrysanthemum,
        Motif::Pine,
        Motif::Crane,
    ];

    fn label(&self) -> &'static str {
        match self {
            Motif::Orchid => "Orchid (兰花)",
            Motif::PlumBlossom => "Plum Blossom (梅花)",
            Motif::Bamboo => "Bamboo (竹)",
            Motif::Chrysanthemum => "Chrysanthemum (菊花)",
            Motif::Pine => "Pine (松)",
            Motif::Crane => "Crane (鹤)",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            Motif::Orchid => "orchid",
            Motif::PlumBlossom => "plum-blossom",
            Motif::Bamboo => "bamboo",
            Motif::Chrysanthemum => "chrysanthemum",
            Motif::Pine => "pine",
            Motif::Crane => "crane",
        }
    }
}

/// 加飾技法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Decoration {
    GoldLines,
    #[default]
    MotherOfPearl,
    SilverDust,
    Carved,
}

impl Vocabulary for Decoration {
    const ALL: &'static [Self] = &[
        Decoration::GoldLines,
        Decoration::MotherOfPearl,
        Decoration::SilverDust,
        Decoration::Carved,
    ];

    fn label(&self) -> &'static str {
        match self {
            Decoration::GoldLines => "Gold Maki-e Lines (金描)",
            Decoration::MotherOfPearl => "Mother-of-pearl Inlay (螺钿)",
            Decoration::SilverDust => "Silver Dust (银粉)",
            Decoration::Carved => "Carved Lacquer (剔红)",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            Decoration::GoldLines => "gold-lines",
            Decoration::MotherOfPearl => "mother-of-pearl",
            Decoration::SilverDust => "silver-dust",
            Decoration::Carved => "carved",
        }
    }
}

/// 器型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VesselShape {
    #[default]
    TeaCanister,
    Natsume,
    IncenseBox,
    Tray,
    Vase,
}

impl Vocabulary for VesselShape {
    const ALL: &'static [Self] = &[
        VesselShape::TeaCanister,
        VesselShape::Natsume,
        VesselShape::IncenseBox,
        VesselShape::Tray,
        VesselShape::Vase,
    ];

    fn label(&self) -> &'static str {
        match self {
            VesselShape::TeaCanister => "Tea Canister (茶叶罐)",
            VesselShape::Natsume => "Natsume Tea Caddy (枣)",
            VesselShape::IncenseBox => "Incense Box (香合)",
            VesselShape::Tray => "Tray (漆盘)",
            VesselShape::Vase => "Vase (花瓶)",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            VesselShape::TeaCanister => "tea-canister",
            VesselShape::Natsume => "natsume",
            VesselShape::IncenseBox => "incense-box",
            VesselShape::Tray => "tray",
            VesselShape::Vase => "vase",
        }
    }
}

impl fmt::Display for BaseMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Motif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Decoration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for VesselShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BaseMaterial {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_choice(s).ok_or_else(|| unknown_choice::<Self>("base material", s))
    }
}

impl FromStr for Motif {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_choice(s).ok_or_else(|| unknown_choice::<Self>("motif", s))
    }
}

impl FromStr for Decoration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_choice(s).ok_or_else(|| unknown_choice::<Self>("decoration", s))
    }
}

impl FromStr for VesselShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_choice(s).ok_or_else(|| unknown_choice::<Self>("shape", s))
    }
}

/// 技法の初期値
pub const DEFAULT_TECHNIQUE: &str = "Maki-e (Sprinkled Gold)";

/// 詳細記述の初期値（茶叶罐の参考デザイン）
pub const DEFAULT_DETAIL_TEXT: &str = "Top has gold-painted orchid lines. Around the canister, simplified scroll grass patterns, harmonizing with the top. Faintly dotted with small granular mother-of-pearl inlays.";

/// 設計レコード
///
/// 編集のたびに1フィールドだけ差し替えた新しい値を作る。欠けたフィールドは持たない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignRecord {
    pub base_material: BaseMaterial,
    pub motif: Motif,
    pub technique: String,
    pub decoration: Decoration,
    pub shape: VesselShape,
    pub detail_text: String,
}

impl Default for DesignRecord {
    fn default() -> Self {
        Self {
            base_material: BaseMaterial::Black,
            motif: Motif::Orchid,
            technique: DEFAULT_TECHNIQUE.to_string(),
            decoration: Decoration::MotherOfPearl,
            shape: VesselShape::TeaCanister,
            detail_text: DEFAULT_DETAIL_TEXT.to_string(),
        }
    }
}

impl DesignRecord {
    pub fn with_base_material(&self, base_material: BaseMaterial) -> Self {
        Self { base_material, ..self.clone() }
    }

    pub fn with_motif(&self, motif: Motif) -> Self {
        Self { motif, ..self.clone() }
    }

    pub fn with_technique(&self, technique: impl Into<String>) -> Self {
        Self { technique: technique.into(), ..self.clone() }
    }

    pub fn with_decoration(&self, decoration: Decoration) -> Self {
        Self { decoration, ..self.clone() }
    }

    pub fn with_shape(&self, shape: VesselShape) -> Self {
        Self { shape, ..self.clone() }
    }

    pub fn with_detail_text(&self, detail_text: impl Into<String>) -> Self {
        Self { detail_text: detail_text.into(), ..self.clone() }
    }
}

/// 画像リソース（MIMEタイプ + Base64データ）
///
/// `data_url()` の結果は追加の取得処理なしで `<img src>` に渡せる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResource {
    pub mime_type: String,
    pub data: String,
}

impl ImageResource {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// "data:image/png;base64,..." 形式
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// MIMEタイプに対応する拡張子
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }
}

/// 生成結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedResult {
    pub id: String,
    pub image: ImageResource,
    /// 生成に使ったプロンプト全文
    pub source_prompt: String,
    /// 作成時刻（UNIXミリ秒）
    pub created_at: u64,
}
