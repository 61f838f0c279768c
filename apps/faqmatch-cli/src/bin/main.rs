use std::env;
use std::io::{self, Write};

use faqmatch_core::config::Config;
use faqmatch_core::types::ChatResponse;
use faqmatch_hybrid::FaqEngine;
use tracing_subscriber::EnvFilter;

const DEFAULT_USER: &str = "default";
const USAGE: &str = "Usage: faqmatch <ask|chat|categories|health|questions|samples> [args...]
  ask [--json] <message> [user]   answer one message
  chat [user]                     interactive session
  categories                      list categories with record counts
  health                          corpus and index summary
  questions [n]                   first n loaded questions (default 10)
  samples                         sample questions to try";

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() { eprintln!("{}", USAGE); std::process::exit(1); }
    let cmd = args.remove(0);
    (cmd, args)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let (cmd, args) = parse_args();
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let engine = FaqEngine::from_config(config.engine()?)?;
    match cmd.as_str() {
        "ask" => {
            let json = args.iter().any(|a| a == "--json");
            let rest: Vec<&String> = args.iter().filter(|a| *a != "--json").collect();
            let Some(message) = rest.first() else { eprintln!("Usage: faqmatch ask [--json] \"<message>\" [user]"); std::process::exit(1) };
            let user = rest.get(1).map_or(DEFAULT_USER, |u| u.as_str());
            let response = engine.respond(message, user);
            if json { println!("{}", serde_json::to_string_pretty(&response)?); } else { print_response(&response); }
        }
        "chat" => {
            let user = args.first().map_or(DEFAULT_USER, String::as_str);
            chat_loop(&engine, user)?;
        }
        "categories" => show_categories(&engine),
        "health" => show_health(&engine),
        "questions" => {
            let n = args.first().and_then(|s| s.parse::<usize>().ok()).unwrap_or(10);
            for q in engine.debug_questions(n) {
                println!("{:>3}. [{}] ({:?}) {}", q.index, q.category, q.kind, q.original);
                println!("     -> {}", q.text);
            }
            println!("Total questions: {}", engine.health().total_questions);
        }
        "samples" => { for q in engine.sample_questions() { println!("{}", q); } }
        _ => { eprintln!("Unknown command: {}\n{}", cmd, USAGE); std::process::exit(1); }
    }
    Ok(())
}

fn print_response(r: &ChatResponse) {
    println!("{}", r.response);
    println!();
    println!("  category: {} | confidence: {:.3} | state: {:?} | query: {:?}", r.category, r.confidence, r.state, r.query_type);
    if !r.matched_question.is_empty() { println!("  matched: {}", r.matched_question); }
    if let Some(suggestions) = &r.suggestions {
        println!("  suggestions:");
        for s in suggestions { println!("    - {}", s); }
    }
}

fn show_categories(engine: &FaqEngine) {
    for c in engine.categories() { println!("{:<20} {}", c.name, c.count); }
}

fn show_health(engine: &FaqEngine) {
    let h = engine.health();
    println!("status:          {}", h.status);
    println!("source:          {}", h.source);
    println!("total FAQs:      {}", h.total_faqs);
    println!("total questions: {}", h.total_questions);
    println!("normalizer:      {}", h.normalizer);
    println!("semantic index:  {} ({} terms)", if h.semantic_available { "ready" } else { "unavailable" }, h.semantic_terms);
}

fn show_stats(engine: &FaqEngine) {
    let s = engine.stats();
    println!("total queries:  {}", s.total_queries);
    println!("short queries:  {} ({:.1}%)", s.short_queries, s.short_fraction * 100.0);
    println!("cache hits:     {} (misses {})", s.cache_hits, s.cache_misses);
    println!("active users:   {}", s.active_users);
}

fn show_help() {
    println!("Commands:");
    println!("  /help        - Show this help message");
    println!("  /categories  - List FAQ categories");
    println!("  /stats       - Show usage counters");
    println!("  /reset       - Forget this conversation");
    println!("  /health      - Show corpus and index summary");
    println!("  /quit        - Exit");
    println!("  <question>   - Ask anything");
}

fn chat_loop(engine: &FaqEngine, user: &str) -> anyhow::Result<()> {
    println!("FAQ assistant ({} FAQs loaded). Type /help for commands.", engine.health().total_faqs);
    println!();
    loop {
        print!("you> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 { break; }
        let input = input.trim();
        if input.is_empty() { continue; }

        match input {
            "/help" | "/h" => show_help(),
            "/categories" | "/c" => show_categories(engine),
            "/stats" | "/s" => show_stats(engine),
            "/health" => show_health(engine),
            "/reset" | "/r" => {
                engine.reset_user(user);
                println!("Conversation reset.");
            }
            "/quit" | "/q" | "quit" | "exit" => { println!("Goodbye!"); break; }
            _ => print_response(&engine.respond(input, user)),
        }
        println!();
    }
    Ok(())
}
