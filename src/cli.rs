use clap::{Args, Parser, Subcommand};
use lacquer_studio_common::{BaseMaterial, Decoration, DesignRecord, Motif, VesselShape};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lacquer-studio")]
#[command(about = "漆器デザイン・AI画像生成ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 設計からプロンプトを生成して表示
    Prompt {
        #[command(flatten)]
        design: DesignArgs,
    },

    /// 設計から画像を1枚生成して保存
    Generate {
        #[command(flatten)]
        design: DesignArgs,

        /// 保存先フォルダ
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// 送信したプロンプトも表示
        #[arg(long)]
        show_prompt: bool,
    },

    /// 選択肢の一覧を表示
    Options,

    /// 設定を表示
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// 対話的にデザインと生成を繰り返す
    Studio {
        /// ダウンロード先フォルダ
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
}

/// 設計レコードの各フィールド（省略時は既定デザイン）
#[derive(Args, Debug, Clone, Default)]
pub struct DesignArgs {
    /// 下地の漆 (black/vermilion/dark-green/amber)
    #[arg(long)]
    pub material: Option<BaseMaterial>,

    /// 主文様 (orchid/plum-blossom/bamboo/chrysanthemum/pine/crane)
    #[arg(long)]
    pub motif: Option<Motif>,

    /// 技法（自由記述）
    #[arg(long)]
    pub technique: Option<String>,

    /// 加飾 (gold-lines/mother-of-pearl/silver-dust/carved)
    #[arg(long)]
    pub decoration: Option<Decoration>,

    /// 器型 (tea-canister/natsume/incense-box/tray/vase)
    #[arg(long)]
    pub shape: Option<VesselShape>,

    /// 詳細記述（自由記述、空文字可）
    #[arg(long)]
    pub detail: Option<String>,
}

impl DesignArgs {
    /// 既定デザインに指定フィールドを上書きする
    pub fn to_record(&self) -> DesignRecord {
        let mut record = DesignRecord::default();
        if let Some(material) = self.material {
            record = record.with_base_material(material);
        }
        if let Some(motif) = self.motif {
            record = record.with_motif(motif);
        }
        if let Some(technique) = &self.technique {
            record = record.with_technique(technique.clone());
        }
        if let Some(decoration) = self.decoration {
            record = record.with_decoration(decoration);
        }
        if let Some(shape) = self.shape {
            record = record.with_shape(shape);
        }
        if let Some(detail) = &self.detail {
            record = record.with_detail_text(detail.clone());
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_gives_default_record() {
        assert_eq!(DesignArgs::default().to_record(), DesignRecord::default());
    }

    #[test]
    fn test_parse_design_flags() {
        let cli = Cli::try_parse_from([
            "lacquer-studio",
            "prompt",
            "--material",
            "vermilion",
            "--motif",
            "Crane",
            "--shape",
            "natsume",
            "--detail",
            "",
        ])
        .expect("parse失敗");

        let Commands::Prompt { design } = cli.command else {
            panic!("prompt expected");
        };
        let record = design.to_record();
        assert_eq!(record.base_material, BaseMaterial::Vermilion);
        assert_eq!(record.motif, Motif::Crane);
        assert_eq!(record.shape, VesselShape::Natsume);
        assert_eq!(record.detail_text, "");
        assert_eq!(record.decoration, Decoration::MotherOfPearl);
    }

    #[test]
    fn test_unknown_choice_rejected() {
        let result = Cli::try_parse_from(["lacquer-studio", "prompt", "--shape", "teapot"]);
        assert!(result.is_err());
    }
}
