use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::{crate_version, App, AppSettings, Arg};
use expreval::{Evaluator, Parser, DEFAULT_MAX_DEPTH};

struct Session {
    parser: Parser,
    evaluator: Evaluator<'static>,
    verbose: bool,
}

impl Session {
    fn run(&self, source: &str) -> anyhow::Result<()> {
        if self.verbose {
            println!("Source:");
            println!("{}\n", source);
        }

        let ast = self.parser.parse_str(source)?;
        if self.verbose {
            println!("AST:");
            println!("{}\n", ast);
        }

        let result = self.evaluator.eval(&ast)?;
        if self.verbose {
            println!("Result:");
        }
        println!("{}", result);
        Ok(())
    }

    fn repl(&self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            print!("> ");
            io::stdout().flush()?;
            let line = match lines.next() {
                Some(line) => line?,
                None => break,
            };
            if line.trim().is_empty() {
                continue;
            }
            if let Err(e) = self.run(&line) {
                eprintln!("error: {}", e);
            }
        }
        println!();
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let matches = App::new("expreval")
        .version(crate_version!())
        .about("evaluates arithmetic expressions")
        .setting(AppSettings::AllowLeadingHyphen)
        .setting(AppSettings::TrailingVarArg)
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("print the source, the parsed tree and the result"),
        )
        .arg(
            Arg::with_name("max-depth")
                .long("max-depth")
                .takes_value(true)
                .value_name("DEPTH")
                .help("deepest nesting of parentheses, signs and calls to accept"),
        )
        .arg(
            Arg::with_name("EXPR")
                .multiple(true)
                .help("expression to evaluate; reads lines from stdin when omitted"),
        )
        .get_matches();

    let max_depth = match matches.value_of("max-depth") {
        Some(depth) => depth
            .parse::<usize>()
            .with_context(|| format!("invalid --max-depth {:?}", depth))?,
        None => DEFAULT_MAX_DEPTH,
    };
    let session = Session {
        parser: Parser::with_max_depth(max_depth),
        evaluator: Evaluator::default(),
        verbose: matches.is_present("verbose"),
    };

    match matches.values_of("EXPR") {
        Some(words) => {
            let source = words.collect::<Vec<&str>>().join(" ");
            session.run(&source)?;
        }
        None => session.repl()?,
    }

    Ok(())
}
