use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "recipe-finder")]
#[command(about = "食材写真からレシピを推薦するクライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// バックエンドのURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub server: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写真をアップロードして食材を検出
    Detect {
        /// 画像ファイルまたはフォルダ
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// 食材と肉フィルターからレシピを推薦
    Recommend {
        /// 画像ファイルまたはフォルダ
        #[arg(short, long = "image")]
        images: Vec<PathBuf>,

        /// 食材を直接指定（カンマ区切り、画像より優先）
        #[arg(long, value_delimiter = ',')]
        ingredients: Vec<String>,

        /// 肉フィルター（複数指定可）
        #[arg(short, long)]
        meat: Vec<String>,
    },

    /// フォルダの写真から推薦まで対話的に実行
    Run {
        /// 写真フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// 肉フィルター（指定時は選択画面を出さない）
        #[arg(short, long)]
        meat: Vec<String>,
    },

    /// 設定を表示/編集
    Config {
        /// バックエンドURLを設定
        #[arg(long)]
        set_server: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recommend() {
        let cli = Cli::try_parse_from([
            "recipe-finder",
            "recommend",
            "--ingredients",
            "egg,onion",
            "--meat",
            "Beef",
            "-m",
            "Fish",
        ])
        .unwrap();

        match cli.command {
            Commands::Recommend { images, ingredients, meat } => {
                assert!(images.is_empty());
                assert_eq!(ingredients, vec!["egg", "onion"]);
                assert_eq!(meat, vec!["Beef", "Fish"]);
            }
            _ => panic!("Expected recommend"),
        }
    }

    #[test]
    fn test_global_server_flag() {
        let cli = Cli::try_parse_from([
            "recipe-finder",
            "detect",
            "a.jpg",
            "--server",
            "http://localhost:8000",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.server.as_deref(), Some("http://localhost:8000"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_detect_requires_paths() {
        assert!(Cli::try_parse_from(["recipe-finder", "detect"]).is_err());
    }
}
