//! Bot command parsing.
//!
//! `parse_command` turns message text into a [`Command`]. Text that is not a command (no leading
//! `/`) parses to `Ok(None)`; malformed commands become a [`ValidationError`] whose message is sent
//! back to the user as-is.

use channel_history::{normalize_channel, DateWindow, FetchRequest, MAX_COUNT_LIMIT};
use chrono::NaiveDate;
use thiserror::Error;

pub const SETCHANNEL_USAGE: &str = "/setchannel @channelname";
pub const SETTOPIC_USAGE: &str = "/settopic technology";
pub const FETCH_USAGE: &str =
    "/fetch @channel count N\n/fetch @channel date YYYY-MM-DD YYYY-MM-DD";
pub const RAG_USAGE: &str =
    "/rag @channel count N QUESTION\n/rag @channel date YYYY-MM-DD YYYY-MM-DD QUESTION";
pub const GET_USAGE: &str = "/get [N]";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    SetChannel { channel: String },
    SetTopic { topic: String },
    /// One-off report for an explicit channel; preferences are not consulted.
    Fetch(FetchRequest),
    /// Newest messages of the stored channel, filtered by the stored topic. `None` uses the configured default.
    Get { limit: Option<usize> },
    /// Today's messages of the stored channel, filtered by the stored topic.
    Recap,
    Rag { request: FetchRequest, query: String },
}

/// A command the bot cannot act on. Displayed to the user as a corrective reply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown command /{0}. Send /help to see what I can do.")]
    UnknownCommand(String),

    #[error("Missing {what}.\nUsage:\n{usage}")]
    MissingArgument {
        what: &'static str,
        usage: &'static str,
    },

    #[error("'{0}' is not a number. The count must be a whole number.")]
    InvalidCount(String),

    #[error("The count must be between 1 and {max}, got {value}.")]
    CountOutOfRange { value: i64, max: usize },

    #[error("'{0}' is not a valid date. Use YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("The start date {from} is after the end date {to}.")]
    InvertedRange { from: NaiveDate, to: NaiveDate },

    #[error("Unknown mode '{mode}'.\nUsage:\n{usage}")]
    InvalidMode {
        mode: String,
        usage: &'static str,
    },
}

/// Splits `/name@bot` into (`name`, `Some("bot")`).
fn split_command_word(word: &str) -> Option<(&str, Option<&str>)> {
    let word = word.strip_prefix('/')?;
    Some(match word.split_once('@') {
        Some((name, bot)) => (name, Some(bot)),
        None => (word, None),
    })
}

/// The `@botname` a command is explicitly addressed to, if any.
pub fn command_addressee(text: &str) -> Option<&str> {
    let word = text.split_whitespace().next()?;
    split_command_word(word).and_then(|(_, bot)| bot.filter(|b| !b.is_empty()))
}

pub fn parse_command(text: &str) -> Result<Option<Command>, ValidationError> {
    let mut words = text.split_whitespace();
    let Some((name, _)) = words.next().and_then(split_command_word) else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match name.to_ascii_lowercase().as_str() {
        "start" => Command::Start,
        "help" => Command::Help,
        "setchannel" => Command::SetChannel {
            channel: parse_channel(args.first().copied(), SETCHANNEL_USAGE)?,
        },
        "settopic" => {
            if args.is_empty() {
                return Err(ValidationError::MissingArgument {
                    what: "topic",
                    usage: SETTOPIC_USAGE,
                });
            }
            Command::SetTopic {
                topic: args.join(" "),
            }
        }
        "fetch" => {
            let (request, _) = parse_fetch_request(&args, FETCH_USAGE)?;
            Command::Fetch(request)
        }
        "get" => Command::Get {
            limit: args.first().map(|raw| parse_count(raw)).transpose()?,
        },
        "recap" => Command::Recap,
        "rag" => {
            let (request, rest) = parse_fetch_request(&args, RAG_USAGE)?;
            if rest.is_empty() {
                return Err(ValidationError::MissingArgument {
                    what: "question",
                    usage: RAG_USAGE,
                });
            }
            Command::Rag {
                request,
                query: rest.join(" "),
            }
        }
        _ => return Err(ValidationError::UnknownCommand(name.to_string())),
    };
    Ok(Some(command))
}

/// `@name` form of a channel argument.
fn parse_channel(raw: Option<&str>, usage: &'static str) -> Result<String, ValidationError> {
    let missing = ValidationError::MissingArgument {
        what: "channel",
        usage,
    };
    let name = normalize_channel(raw.ok_or(missing.clone())?);
    if name.is_empty() {
        return Err(missing);
    }
    Ok(format!("@{}", name))
}

/// Parses a count in `1..=MAX_COUNT_LIMIT`.
pub fn parse_count(raw: &str) -> Result<usize, ValidationError> {
    let value: i64 = raw
        .parse()
        .map_err(|_| ValidationError::InvalidCount(raw.to_string()))?;
    if value < 1 || value > MAX_COUNT_LIMIT as i64 {
        return Err(ValidationError::CountOutOfRange {
            value,
            max: MAX_COUNT_LIMIT,
        });
    }
    Ok(value as usize)
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}

/// Parses `@channel count N` or `@channel date FROM TO`; returns the request and the remaining words.
fn parse_fetch_request<'a, 'b>(
    args: &'b [&'a str],
    usage: &'static str,
) -> Result<(FetchRequest, &'b [&'a str]), ValidationError> {
    let channel = parse_channel(args.first().copied(), usage)?;
    let mode = args.get(1).ok_or(ValidationError::MissingArgument {
        what: "mode ('count' or 'date')",
        usage,
    })?;

    match mode.to_ascii_lowercase().as_str() {
        "count" => {
            let raw = args.get(2).ok_or(ValidationError::MissingArgument {
                what: "count",
                usage,
            })?;
            let limit = parse_count(raw)?;
            Ok((FetchRequest::count(channel, limit), &args[3..]))
        }
        "date" => {
            let (Some(raw_from), Some(raw_to)) = (args.get(2), args.get(3)) else {
                return Err(ValidationError::MissingArgument {
                    what: "date range",
                    usage,
                });
            };
            let from = parse_date(raw_from)?;
            let to = parse_date(raw_to)?;
            if from > to {
                return Err(ValidationError::InvertedRange { from, to });
            }
            if DateWindow::from_dates(from, to).is_none() {
                return Err(ValidationError::InvalidDate(raw_to.to_string()));
            }
            Ok((FetchRequest::date_range(channel, from, to), &args[4..]))
        }
        other => Err(ValidationError::InvalidMode {
            mode: other.to_string(),
            usage,
        }),
    }
}
