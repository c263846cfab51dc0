use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use recipe_finder::{cli, client, config, display, error, logging, meat_prompt, scanner};
use recipe_finder_common::panel::RECOMMEND_BUSY_LABEL;
use recipe_finder_common::{DetectionStatus, MeatSelection, Session};
use cli::{Cli, Commands};
use client::HttpBackend;
use config::Config;
use scanner::ImageInfo;
use std::path::PathBuf;
use std::time::Duration;

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

fn new_session(config: &Config) -> Session<ImageInfo> {
    Session::new(MeatSelection::new(config.meat_options.iter().cloned()))
}

/// 画像をアップロードして検出結果を表示
async fn detect(
    session: &mut Session<ImageInfo>,
    backend: &HttpBackend,
    images: Vec<ImageInfo>,
) {
    println!("📸 {}枚の写真をアップロード", images.len());
    let pb = spinner(&DetectionStatus::Detecting.display_text());
    let status = session.upload(backend, images).await;
    pb.finish_and_clear();

    println!("🥕 検出された食材: {}", status.display_text());
    if let DetectionStatus::Error(message) = status {
        eprintln!("   {}", message);
    }
}

/// 推薦を要求して結果を表示
async fn recommend(session: &mut Session<ImageInfo>, backend: &HttpBackend) -> error::Result<()> {
    let pb = spinner(RECOMMEND_BUSY_LABEL);
    let result = session.recommend(backend).await;
    pb.finish_and_clear();

    let panel = result?;
    println!("\n{}", display::render_panel(panel, |i| backend.resolve_image_url(i)));
    Ok(())
}

fn backend_for(config: &Config, server: Option<&str>) -> error::Result<HttpBackend> {
    let url = config.resolve_server(server)?;
    tracing::debug!("backend: {}", url);
    HttpBackend::new(&url, config.timeout_seconds)
}

fn collect(paths: &[PathBuf]) -> error::Result<Vec<ImageInfo>> {
    let images = scanner::collect_images(paths)?;
    if images.is_empty() {
        let joined = paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(error::RecipeFinderError::NoImagesFound(joined));
    }
    Ok(images)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config::load().context("設定ファイルの読み込みに失敗しました")?;

    match cli.command {
        Commands::Detect { paths } => {
            let backend = backend_for(&config, cli.server.as_deref())?;
            let mut session = new_session(&config);

            let images = collect(&paths)?;
            detect(&mut session, &backend, images).await;
        }

        Commands::Recommend { images, ingredients, meat } => {
            let backend = backend_for(&config, cli.server.as_deref())?;
            let mut session = new_session(&config);

            if !ingredients.is_empty() {
                session.set_ingredients(ingredients);
                println!("🥕 食材: {}", session.detection().display_text());
            } else if !images.is_empty() {
                let images = collect(&images)?;
                detect(&mut session, &backend, images).await;
            }

            meat_prompt::apply_meat_choice(&mut session, &meat)?;
            println!("🥩 肉フィルター: {}", session.meat().selected_labels().join(", "));

            recommend(&mut session, &backend).await?;
        }

        Commands::Run { folder, meat } => {
            println!("🍳 recipe-finder - 一括処理\n");
            let backend = backend_for(&config, cli.server.as_deref())?;
            let mut session = new_session(&config);

            // 1. Scan
            println!("[1/3] 写真をスキャン中...");
            let images = scanner::scan_folder(&folder)?;
            if images.is_empty() {
                return Err(error::RecipeFinderError::NoImagesFound(
                    folder.display().to_string(),
                )
                .into());
            }

            // 2. Detect
            println!("[2/3] 食材を検出中...");
            detect(&mut session, &backend, images).await;

            // 3. Meat + Recommend
            println!("[3/3] レシピを検索中...");
            if meat.is_empty() {
                meat_prompt::select_meats_interactive(&mut session)?;
            } else {
                meat_prompt::apply_meat_choice(&mut session, &meat)?;
            }
            recommend(&mut session, &backend).await?;

            println!("\n✅ 完了");
        }

        Commands::Config { set_server, show } => {
            let mut config = config;

            if let Some(url) = set_server {
                config.set_server(url)?;
                println!("✔ バックエンドURLを設定しました");
            }

            if show {
                println!("設定:");
                println!("  バックエンドURL: {}", config.server_url);
                println!("  使用中のURL: {}", config.resolve_server(cli.server.as_deref())?);
                println!(
                    "  タイムアウト: {}",
                    if config.timeout_seconds == 0 {
                        "なし".to_string()
                    } else {
                        format!("{}秒", config.timeout_seconds)
                    }
                );
                println!("  肉の選択肢: {}", config.meat_options.join(", "));
            }
        }
    }

    Ok(())
}
