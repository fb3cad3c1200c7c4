use clap::Parser;
use lacquer_studio::{cli, config, error, generate, studio, transport};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use lacquer_studio_common::{compile_prompt, BaseMaterial, Decoration, Motif, VesselShape, Vocabulary};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Prompt { design } => {
            println!("{}", compile_prompt(&design.to_record()));
        }

        Commands::Generate { design, output, show_prompt } => {
            println!("🏺 lacquer-studio - 画像生成\n");
            let config = Config::from_env();
            let record = design.to_record();

            println!("[1/2] 生成中... ({})", config.model);
            let transport = transport::ReqwestTransport::new();
            let generation = generate::render_design(
                &transport,
                &config.model,
                config.api_key.as_deref(),
                &record,
            )
            .await?;
            println!("✔ 生成完了\n");

            if show_prompt {
                println!("{}\n", generation.prompt);
            }

            println!("[2/2] 保存中...");
            let now = generate::now_ms();
            let result = lacquer_studio_common::GeneratedResult {
                id: now.to_string(),
                image: generation.image,
                source_prompt: generation.prompt,
                created_at: now,
            };
            let path = generate::save_result(&result, &output)?;
            println!("✔ 保存しました: {}", path.display());

            println!("\n✅ 完了");
        }

        Commands::Options => {
            print_options("Base Lacquer (底色)", BaseMaterial::ALL);
            print_options("Main Motif (纹样)", Motif::ALL);
            print_options("Embellishments (装饰)", Decoration::ALL);
            print_options("Vessel Shape (器型)", VesselShape::ALL);
        }

        Commands::Config { show } => {
            let config = Config::from_env();
            if show {
                println!("設定:");
                println!("  モデル: {}", config.model);
                println!("  APIキー: {}", if config.has_api_key() { "設定済み" } else { "未設定" });
            } else {
                println!("{}", serde_json::to_string_pretty(&ConfigView::from(&config))?);
            }
        }

        Commands::Studio { output } => {
            studio::run_studio(&output).await?;
        }
    }

    Ok(())
}

fn print_options<V: Vocabulary>(title: &str, options: &[V]) {
    println!("{}:", title);
    for option in options {
        println!("  {:<16} {}", option.key(), option.label());
    }
    println!();
}

/// APIキー本体を出さない設定表示
#[derive(serde::Serialize)]
struct ConfigView<'a> {
    model: &'a str,
    api_key_set: bool,
}

impl<'a> From<&'a Config> for ConfigView<'a> {
    fn from(config: &'a Config) -> Self {
        Self {
            model: &config.model,
            api_key_set: config.has_api_key(),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "lacquer_studio=debug" } else { "lacquer_studio=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
