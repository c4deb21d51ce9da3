use crate::CLAP_STYLING;
use clap::{arg, command};
use sitefix_scanner::validator::{DEFAULT_BASE_URL, DEFAULT_PAGE};
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("sitefix")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sitefix")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Suppress the banner")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(-v --"verbose" "Show debug logging on stderr")
                .required(false)
                .global(true),
        )
        .subcommand_required(false)
        .subcommand(
            command!("fix")
                .about(
                    "Rewrite asset and navigation paths in every HTML file under pages/ so they \
                are correct for the file's depth.",
                )
                .arg(
                    arg!(-r --"root" <DIR>)
                        .required(false)
                        .help("Site root; depth is measured from here")
                        .default_value("."),
                )
                .arg(
                    arg!(-p --"pages-dir" <DIR>)
                        .required(false)
                        .help("Directory under the root that is searched for HTML files")
                        .default_value("pages"),
                )
                .arg(
                    arg!(--"dry-run")
                        .required(false)
                        .help("Report what would change without writing any file")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
        )
        .subcommand(
            command!("validate")
                .about(
                    "Fetch a page from a running local server and check that its archive links \
                respond and are styled.",
                )
                .arg(
                    arg!(-u --"base-url" <URL>)
                        .required(false)
                        .help("Root URL the site is served from")
                        .value_parser(clap::value_parser!(Url))
                        .default_value(DEFAULT_BASE_URL),
                )
                .arg(
                    arg!(-p --"page" <PATH>)
                        .required(false)
                        .help("Page whose archive links are checked, relative to the base URL")
                        .default_value(DEFAULT_PAGE),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Timeout for fetching the page")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("10"),
                )
                .arg(
                    arg!(--"link-timeout" <SECONDS>)
                        .required(false)
                        .help("Timeout for each link check")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("5"),
                )
                .arg(
                    arg!(--"delay-ms" <MILLIS>)
                        .required(false)
                        .help("Pause between link checks")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("100"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
        )
        .subcommand(
            command!("generate")
                .about("Generate an HTML page from the site templates")
                .arg(
                    arg!(-t --"title" <TITLE>)
                        .required(true)
                        .help("Page title"),
                )
                .arg(
                    arg!(-c --"content-file" <PATH>)
                        .required(true)
                        .help("File holding the page's main content")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(true)
                        .help("Output path, relative to the site root")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(--"templates" <DIR>)
                        .required(false)
                        .help("Directory holding base-template.html, header.html, navigation.html and footer.html")
                        .default_value("templates"),
                )
                .arg(
                    arg!(-r --"root" <DIR>)
                        .required(false)
                        .help("Site root the output path is relative to")
                        .default_value("."),
                )
                .arg(
                    arg!(-d --"depth" <DEPTH>)
                        .required(false)
                        .help(
                            "Directory depth of the page, not counting pages/ \
                        (default: derived from the output path, as `fix` does)",
                        )
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(-a --"active" <PAGE>)
                        .required(false)
                        .help("Navigation entry to highlight: home, leadership, calendar, forms, awards"),
                ),
        )
}
