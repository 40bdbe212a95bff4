//! 引数解析（clap builder）と Command への変換

use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::domain::{ModelName, ProviderName};
use common::error::Error;

use crate::domain::{
    Command, CompetitionLevel, Difficulty, KeywordFilter, SearchVolume,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub help: bool,
    /// -v / --verbose: 不具合調査用の冗長ログを stderr に出力する
    pub verbose: bool,
    /// --json: 表示をカードではなく JSON にする
    pub json: bool,
    pub profile: Option<ProviderName>,
    pub model: Option<ModelName>,
    /// -d / --home-dir: このプロセスの KWGEN_HOME を上書きする
    pub home_dir: Option<String>,
    /// -n / --count: 生成件数
    pub count: Option<u8>,
    /// --difficulty / --volume / --competition: saved の絞り込み
    pub difficulty: Option<String>,
    pub volume: Option<String>,
    pub competition: Option<String>,
    pub command_name: Option<String>,
    pub command_args: Vec<String>,
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("kwgen")
        .about("Generate and curate SEO keyword ideas with a generative text service")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Emit verbose debug logs to stderr (for troubleshooting)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("json")
                .long("json")
                .help("Print results as JSON instead of cards")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("profile")
                .short('p')
                .long("profile")
                .value_name("profile")
                .help("Specify provider profile (gemini, echo, or a name from profiles.json)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Specify model name (e.g. gemini-2.5-flash)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("home-dir")
                .short('d')
                .long("home-dir")
                .value_name("directory")
                .help("Specify a home directory (sets KWGEN_HOME for this process)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("count")
                .short('n')
                .long("count")
                .value_name("count")
                .help("Number of keywords to generate (1-20, default 10)")
                .value_parser(value_parser!(u8))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("difficulty")
                .long("difficulty")
                .value_name("level")
                .help("Filter saved keywords by difficulty (low, medium, high, very-high)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("volume")
                .long("volume")
                .value_name("bucket")
                .help("Filter saved keywords by search volume (0-10, 10-100, 100-1K, 1K-10K, 10K-100K, 100K+)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("competition")
                .long("competition")
                .value_name("level")
                .help("Filter saved keywords by competition level (low, medium, high, very-high)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate-completion")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script (bash, zsh, fish)")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .arg(clap::Arg::new("command").num_args(1))
        .arg(
            clap::Arg::new("args")
                .num_args(0..)
                .trailing_var_arg(true),
        )
}

/// コマンドライン引数を解析する
pub fn parse_args() -> Result<ParseOutcome, Error> {
    parse_args_from(std::env::args().collect())
}

/// 引数ベクタから解析する（テスト用に分離）
pub fn parse_args_from(argv: Vec<String>) -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(argv)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(shell) = matches.get_one::<Shell>("generate-completion") {
        return Ok(ParseOutcome::GenerateCompletion(*shell));
    }

    let config = Config {
        help: matches.get_flag("help"),
        verbose: matches.get_flag("verbose"),
        json: matches.get_flag("json"),
        profile: matches
            .get_one::<String>("profile")
            .map(|s| ProviderName::new(s.clone())),
        model: matches
            .get_one::<String>("model")
            .map(|s| ModelName::new(s.clone())),
        home_dir: matches.get_one::<String>("home-dir").cloned(),
        count: matches.get_one::<u8>("count").copied(),
        difficulty: matches.get_one::<String>("difficulty").cloned(),
        volume: matches.get_one::<String>("volume").cloned(),
        competition: matches.get_one::<String>("competition").cloned(),
        command_name: matches.get_one::<String>("command").cloned(),
        command_args: matches
            .get_many::<String>("args")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
    };
    Ok(ParseOutcome::Config(config))
}

/// Config から絞り込み条件を組み立てる。不正な値は usage エラー
pub fn filter_from_config(config: &Config) -> Result<KeywordFilter, Error> {
    let difficulty = match &config.difficulty {
        Some(raw) => Some(Difficulty::parse_cli(raw).ok_or_else(|| {
            Error::invalid_argument(format!(
                "Unknown difficulty: '{}'. Allowed: low, medium, high, very-high",
                raw
            ))
        })?),
        None => None,
    };
    let search_volume = match &config.volume {
        Some(raw) => Some(SearchVolume::parse_cli(raw).ok_or_else(|| {
            Error::invalid_argument(format!(
                "Unknown volume: '{}'. Allowed: 0-10, 10-100, 100-1K, 1K-10K, 10K-100K, 100K+",
                raw
            ))
        })?),
        None => None,
    };
    let competition_level = match &config.competition {
        Some(raw) => Some(CompetitionLevel::parse_cli(raw).ok_or_else(|| {
            Error::invalid_argument(format!(
                "Unknown competition: '{}'. Allowed: low, medium, high, very-high",
                raw
            ))
        })?),
        None => None,
    };
    Ok(KeywordFilter {
        difficulty,
        search_volume,
        competition_level,
    })
}

/// Config を Command に変換する（バリデーションは usage エラーとして返す）
pub fn config_to_command(config: &Config) -> Result<Command, Error> {
    match config.command_name.as_deref() {
        None => Ok(Command::Interactive),
        Some("generate") => {
            let seed = config.command_args.join(" ");
            Ok(Command::Generate {
                seed,
                count: config.count.unwrap_or(10),
                json: config.json,
            })
        }
        Some("saved") => Ok(Command::Saved {
            filter: filter_from_config(config)?,
            json: config.json,
        }),
        Some("remove") => Ok(Command::Remove {
            ids: config.command_args.clone(),
        }),
        Some("clear") => Ok(Command::Clear),
        Some(name) => Ok(Command::Unknown(name.to_string())),
    }
}

/// 補完スクリプトを stdout に出力する
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
