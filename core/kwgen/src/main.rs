mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

use std::io::{self, BufRead, Write};
use std::process;

use common::error::Error;

use cli::{config_to_command, parse_args, print_completion, ParseOutcome};
use domain::{
    validate_count, Command, CompetitionLevel, Difficulty, KeywordFilter, KeywordRecord, RecordId,
    SearchVolume, SeedKeyword,
};
use usecase::session::NO_CREDENTIAL_MESSAGE;
use usecase::KeywordSession;
use wiring::wire_kwgen;

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("kwgen: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let outcome = parse_args()?;
    let config = match &outcome {
        ParseOutcome::Config(c) => c.clone(),
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(*shell);
            return Ok(0);
        }
    };

    if config.help {
        print_help();
        return Ok(0);
    }

    // -d/--home-dir 指定時は KWGEN_HOME を設定し、profiles.json がその配下から読まれるようにする
    if let Some(ref h) = config.home_dir {
        std::env::set_var("KWGEN_HOME", h);
    }

    if config.verbose {
        use common::ports::outbound::EnvResolver;
        let env = common::adapter::StdEnvResolver;
        if let Ok(home) = env.resolve_home_dir() {
            eprintln!("kwgen: config dir: {}", home.display());
        }
        if let Ok(data) = env.resolve_data_dir() {
            eprintln!("kwgen: data dir: {}", data.display());
        }
    }

    let command = config_to_command(&config)?;
    let mut app = wire_kwgen(config.profile.as_ref(), config.model.as_ref())?;
    app.session.bootstrap();

    dispatch(&mut app.session, command)
}

/// Command をディスパッチする（match は main レイヤーに集約）
fn dispatch(session: &mut KeywordSession, command: Command) -> Result<i32, Error> {
    match command {
        Command::Interactive => run_interactive(session),
        Command::Generate { seed, count, json } => {
            let seed = SeedKeyword::new(seed)?;
            let count = validate_count(count)?;
            if !session.credential_available() {
                return Err(Error::env(format!(
                    "{} (export GEMINI_API_KEY or configure api_key_env in profiles.json)",
                    NO_CREDENTIAL_MESSAGE
                )));
            }
            session.request_generation(&seed, count);
            if let Some(msg) = session.last_error() {
                return Err(Error::system(msg.to_string()));
            }
            if json {
                print_json(session.generated_batch())?;
            } else {
                for (i, record) in session.generated_batch().iter().enumerate() {
                    println!("{}", format_card(i + 1, record, false));
                }
            }
            Ok(0)
        }
        Command::Saved { filter, json } => {
            session.set_filter(filter);
            let visible: Vec<KeywordRecord> =
                session.visible_saved().into_iter().cloned().collect();
            if json {
                print_json(&visible)?;
            } else if visible.is_empty() {
                if session.saved_records().is_empty() {
                    println!("(no saved keywords)");
                } else {
                    println!("(no saved keywords match the current filter)");
                }
            } else {
                for (i, record) in visible.iter().enumerate() {
                    println!("{}", format_card(i + 1, record, false));
                }
            }
            Ok(0)
        }
        Command::Remove { ids } => {
            if ids.is_empty() {
                return Err(Error::invalid_argument(
                    "remove requires at least one keyword id".to_string(),
                ));
            }
            let mut removed = 0usize;
            for raw in &ids {
                let id = RecordId::new(raw.clone());
                if session.is_saved(&id) {
                    session.remove_saved(&id);
                    removed += 1;
                } else {
                    eprintln!("kwgen: no saved keyword with id '{}'", raw);
                }
            }
            println!("Removed {} keyword(s).", removed);
            Ok(0)
        }
        Command::Clear => {
            session.clear_saved();
            println!("Cleared all saved keywords.");
            Ok(0)
        }
        Command::Unknown(name) => Err(Error::invalid_argument(format!(
            "Command '{}' is not implemented.",
            name
        ))),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), Error> {
    let rendered =
        serde_json::to_string_pretty(value).map_err(|e| Error::json(e.to_string()))?;
    println!("{}", rendered);
    Ok(())
}

/// 1 レコードをカード表示用に整形する
fn format_card(index: usize, record: &KeywordRecord, saved: bool) -> String {
    let mut out = String::new();
    let mark = if saved { " [saved]" } else { "" };
    out.push_str(&format!("{:2}. {}{}\n", index, record.keyword, mark));
    out.push_str(&format!(
        "    difficulty: {:<9}  volume: {:<8}  competition: {:<9}  cpc: {}\n",
        record.difficulty.as_str(),
        record.search_volume.as_str(),
        record.competition_level.as_str(),
        record.estimated_cpc,
    ));
    if !record.content_ideas.is_empty() {
        out.push_str(&format!("    ideas: {}\n", record.content_ideas.join("; ")));
    }
    if !record.serp_features.is_empty() {
        let labels: Vec<&str> = record.serp_features.iter().map(|f| f.label()).collect();
        out.push_str(&format!("    serp:  {}\n", labels.join(", ")));
    }
    // 末尾の改行はカード間の区切りに使うので 1 つだけ残す
    out.trim_end().to_string()
}

fn print_usage() {
    eprintln!("Usage: kwgen [-h] [-p profile] [-m model] [-d directory] [--json] [<command> [args...]]");
}

fn print_help() {
    println!("Usage: kwgen [options] [<command> [args...]]");
    println!("  -h, --help            Show this help message.");
    println!("  -p, --profile         Provider profile (gemini, echo, or a name from profiles.json). Default: gemini.");
    println!("  -m, --model           Model name (e.g. gemini-2.5-flash).");
    println!("  -d, --home-dir        Home directory (sets KWGEN_HOME for this process).");
    println!("  -n, --count           Number of keywords to generate (1-20, default 10).");
    println!("  -v, --verbose         Emit verbose debug logs (for troubleshooting).");
    println!("  --json                Print results as JSON instead of cards.");
    println!("  --generate <shell>    Generate shell completion script (bash, zsh, fish).");
    println!();
    println!("Environment:");
    println!("  KWGEN_HOME      Config directory (profiles.json). Default: $XDG_CONFIG_HOME/kwgen or ~/.config/kwgen.");
    println!("  KWGEN_DATA      Data directory (saved keywords, log). Default: $XDG_DATA_HOME/kwgen or ~/.local/share/kwgen.");
    println!("  GEMINI_API_KEY  API key for the gemini provider (profiles.json can name another variable).");
    println!();
    println!("Commands:");
    println!("  (none)                          Start an interactive session.");
    println!("  generate <seed words...>        Generate keyword ideas once and print them (does not save).");
    println!("  saved [--difficulty D] [--volume V] [--competition C]");
    println!("                                  List saved keywords, optionally filtered.");
    println!("  remove <id> [id...]             Remove saved keyword(s) by id.");
    println!("  clear                           Remove all saved keywords.");
}

fn print_interactive_help() {
    println!("Commands:");
    println!("  gen <seed words...> [count]     Generate keyword ideas (count 1-20, default 10).");
    println!("  save <n> [n...]                 Save generated keyword(s) by list number.");
    println!("  saved                           Show saved keywords (current filter applied).");
    println!("  filter <axis>=<value> [...]     Set filters. Axes: difficulty, volume, competition.");
    println!("  filter clear                    Drop all filters.");
    println!("  remove <n> [n...]               Remove saved keyword(s) by list number.");
    println!("  clear                           Remove all saved keywords.");
    println!("  key                             Enter an API key for this session.");
    println!("  help                            Show this help.");
    println!("  quit                            Leave the session.");
}

/// 対話セッション（プレゼンテーション層）
fn run_interactive(session: &mut KeywordSession) -> Result<i32, Error> {
    println!("kwgen interactive session. Type 'help' for commands, 'quit' to exit.");
    if !session.credential_available() {
        println!("No API key configured. Use 'key' to set one before generating.");
    }
    if !session.saved_records().is_empty() {
        println!("{} saved keyword(s) loaded.", session.saved_records().len());
    }

    let stdin = io::stdin();
    loop {
        print!("kwgen> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .map_err(|e| Error::io_msg(e.to_string()))?;
        if read == 0 {
            // EOF
            println!();
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or("");
        let rest: Vec<&str> = parts.collect();

        match command {
            "gen" => handle_gen(session, &rest),
            "save" => handle_save(session, &rest),
            "saved" => print_saved(session),
            "filter" => handle_filter(session, &rest),
            "remove" => handle_remove(session, &rest),
            "clear" => {
                session.clear_saved();
                println!("Cleared all saved keywords.");
            }
            "key" => match session.request_credential() {
                Ok(()) => println!("API key set for this session."),
                Err(e) => eprintln!("kwgen: {}", e),
            },
            "help" => print_interactive_help(),
            "quit" | "exit" => break,
            other => println!("Unknown command: '{}'. Type 'help'.", other),
        }
    }
    Ok(0)
}

/// gen の引数解析: 末尾トークンが数値なら件数、それ以外はシードの一部
fn parse_gen_args(rest: &[&str]) -> Result<(SeedKeyword, u8), Error> {
    let mut words = rest.to_vec();
    let mut count = 10u8;
    if words.len() > 1 {
        if let Some(last) = words.last() {
            if let Ok(n) = last.parse::<u8>() {
                count = n;
                words.pop();
            }
        }
    }
    let seed = SeedKeyword::new(words.join(" "))?;
    let count = validate_count(count)?;
    Ok((seed, count))
}

fn handle_gen(session: &mut KeywordSession, rest: &[&str]) {
    // 単一スレッドの対話ループでは実際には起こらないが、busy 中の再入は契約上呼び出し側が防ぐ
    if session.busy() {
        println!("A generation request is already running.");
        return;
    }
    let (seed, count) = match parse_gen_args(rest) {
        Ok(parsed) => parsed,
        Err(e) => {
            println!("{}", e);
            return;
        }
    };

    println!("Generating {} keyword ideas for \"{}\"...", count, seed);
    session.request_generation(&seed, count);

    if let Some(msg) = session.last_error() {
        println!("{}", msg);
        return;
    }
    for (i, record) in session.generated_batch().iter().enumerate() {
        let saved = session.is_saved(&record.id);
        println!("{}", format_card(i + 1, record, saved));
    }
    println!("Use 'save <n>' to keep keywords across sessions.");
}

fn handle_save(session: &mut KeywordSession, rest: &[&str]) {
    if rest.is_empty() {
        println!("save requires at least one list number (e.g. 'save 1 3').");
        return;
    }
    if session.generated_batch().is_empty() {
        println!("Nothing generated yet. Run 'gen <seed>' first.");
        return;
    }
    let mut saved = 0usize;
    for raw in rest {
        let record = match raw
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| session.generated_batch().get(i).cloned())
        {
            Some(record) => record,
            None => {
                println!(
                    "'{}' is not a valid list number (1-{}).",
                    raw,
                    session.generated_batch().len()
                );
                continue;
            }
        };
        if session.is_saved(&record.id) {
            println!("'{}' is already saved.", record.keyword);
            continue;
        }
        session.save_record(record);
        saved += 1;
    }
    println!(
        "Saved {} keyword(s). {} total.",
        saved,
        session.saved_records().len()
    );
}

fn print_saved(session: &KeywordSession) {
    let visible = session.visible_saved();
    if let Some(summary) = filter_summary(session.filter()) {
        println!("Filter: {}", summary);
    }
    if visible.is_empty() {
        if session.saved_records().is_empty() {
            println!("(no saved keywords)");
        } else {
            println!("(no saved keywords match the current filter)");
        }
        return;
    }
    for (i, record) in visible.iter().enumerate() {
        println!("{}", format_card(i + 1, record, false));
    }
}

/// 有効なフィルタの要約（制約なしなら None）
fn filter_summary(filter: &KeywordFilter) -> Option<String> {
    if filter.is_unconstrained() {
        return None;
    }
    let mut parts = Vec::new();
    if let Some(d) = filter.difficulty {
        parts.push(format!("difficulty={}", d));
    }
    if let Some(v) = filter.search_volume {
        parts.push(format!("volume={}", v));
    }
    if let Some(c) = filter.competition_level {
        parts.push(format!("competition={}", c));
    }
    Some(parts.join(", "))
}

/// filter の引数解析結果
#[derive(Debug, PartialEq)]
enum FilterAction {
    Clear,
    Merge(KeywordFilter),
}

/// filter の引数解析: "difficulty=high" 形式のトークン列か "clear"
fn parse_filter_args(rest: &[&str]) -> Result<FilterAction, Error> {
    if rest.len() == 1 && rest[0] == "clear" {
        return Ok(FilterAction::Clear);
    }
    if rest.is_empty() {
        return Err(Error::invalid_argument(
            "filter requires '<axis>=<value>' arguments or 'clear'".to_string(),
        ));
    }
    let mut partial = KeywordFilter::default();
    for token in rest {
        let (axis, value) = token.split_once('=').ok_or_else(|| {
            Error::invalid_argument(format!(
                "'{}' is not of the form '<axis>=<value>' (axes: difficulty, volume, competition)",
                token
            ))
        })?;
        match axis {
            "difficulty" => {
                partial.difficulty = Some(Difficulty::parse_cli(value).ok_or_else(|| {
                    Error::invalid_argument(format!(
                        "Unknown difficulty: '{}'. Allowed: low, medium, high, very-high",
                        value
                    ))
                })?);
            }
            "volume" => {
                partial.search_volume = Some(SearchVolume::parse_cli(value).ok_or_else(|| {
                    Error::invalid_argument(format!(
                        "Unknown volume: '{}'. Allowed: 0-10, 10-100, 100-1K, 1K-10K, 10K-100K, 100K+",
                        value
                    ))
                })?);
            }
            "competition" => {
                partial.competition_level =
                    Some(CompetitionLevel::parse_cli(value).ok_or_else(|| {
                        Error::invalid_argument(format!(
                            "Unknown competition: '{}'. Allowed: low, medium, high, very-high",
                            value
                        ))
                    })?);
            }
            other => {
                return Err(Error::invalid_argument(format!(
                    "Unknown filter axis: '{}'. Axes: difficulty, volume, competition",
                    other
                )));
            }
        }
    }
    Ok(FilterAction::Merge(partial))
}

fn handle_filter(session: &mut KeywordSession, rest: &[&str]) {
    match parse_filter_args(rest) {
        Ok(FilterAction::Clear) => {
            session.reset_filter();
            println!("Filters cleared.");
        }
        Ok(FilterAction::Merge(partial)) => {
            session.set_filter(partial);
            match filter_summary(session.filter()) {
                Some(summary) => println!("Filter: {}", summary),
                None => println!("Filters cleared."),
            }
        }
        Err(e) => println!("{}", e),
    }
}

fn handle_remove(session: &mut KeywordSession, rest: &[&str]) {
    if rest.is_empty() {
        println!("remove requires at least one list number (e.g. 'remove 2').");
        return;
    }
    // 番号は現在見えているリストに対する 1 始まり。先に id へ解決してから削除する
    let visible_ids: Vec<RecordId> = session
        .visible_saved()
        .iter()
        .map(|r| r.id.clone())
        .collect();
    let mut removed = 0usize;
    for raw in rest {
        match raw
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| visible_ids.get(i))
        {
            Some(id) => {
                session.remove_saved(id);
                removed += 1;
            }
            None => println!(
                "'{}' is not a valid list number (1-{}).",
                raw,
                visible_ids.len()
            ),
        }
    }
    println!(
        "Removed {} keyword(s). {} total.",
        removed,
        session.saved_records().len()
    );
}
