use clap::{CommandFactory, Parser};

mod commands;
mod output;

use brename::ErrorCode;
use commands::batch::{self, BatchArgs};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "brename")]
#[command(version = VERSION)]
#[command(about = "Recursively batch rename files and directories by regular expression")]
struct Cli {
    #[command(flatten)]
    args: BatchArgs,

    /// Print a JSON response envelope instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    if cli.json {
        let result = batch::run(cli.args, &mut |_| {});
        let (json_result, exit_code) = output::map_cmd_result_to_json(result);
        if let Err(err) = output::print_json_result(json_result) {
            eprintln!("{}", output::text::describe_error(&err));
            return std::process::ExitCode::from(1);
        }
        return std::process::ExitCode::from(exit_code_to_u8(exit_code));
    }

    let result = batch::run(cli.args, &mut |report| {
        if let Err(err) = output::text::print_path_report(report) {
            eprintln!("{}", output::text::describe_error(&err));
        }
    });

    match result {
        Ok((_, exit_code)) => std::process::ExitCode::from(exit_code_to_u8(exit_code)),
        Err(err) => {
            if err.code == ErrorCode::ValidationMissingArgument {
                Cli::command().print_help().ok();
                println!();
            }
            output::text::print_error(&err).ok();
            std::process::ExitCode::from(exit_code_to_u8(output::exit_code_for_error(err.code)))
        }
    }
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
