//! Parsing of the raw response header block.

// self
use crate::{_prelude::*, rate_limit::RATE_LIMIT_REMAINING_HEADER};

/// Response headers keyed by their name as received.
pub type HeaderMap = BTreeMap<String, String>;

/// Status line plus headers of one response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderBlock {
	/// First line of the block, e.g. `HTTP/1.1 200 OK`.
	pub status_line: String,
	/// Header lines split on their first colon; later duplicates replace earlier ones.
	pub headers: HeaderMap,
}
impl HeaderBlock {
	/// Parses a CRLF-delimited header block (without the terminating blank line).
	///
	/// Each line after the first splits on its first colon. The value keeps everything after
	/// that colon minus at most one leading space, so timestamps and URLs survive intact.
	/// Empty lines are skipped; a non-empty line without a colon is
	/// [`Error::MalformedHeader`].
	pub fn parse(block: &str) -> Result<Self> {
		let mut lines = block.split("\r\n");
		let status_line = lines.next().unwrap_or_default().to_owned();
		let mut headers = HeaderMap::new();

		for line in lines.filter(|line| !line.is_empty()) {
			let (name, value) = split_line(line)
				.ok_or_else(|| Error::MalformedHeader { line: line.to_owned() })?;

			headers.insert(name.to_owned(), value.to_owned());
		}

		Ok(Self { status_line, headers })
	}

	/// Looks up a header case-insensitively.
	pub fn get(&self, name: &str) -> Option<&str> {
		find_header(&self.headers, name)
	}

	/// Numeric status code from the status line.
	pub fn status_code(&self) -> Option<u16> {
		parse_status_code(&self.status_line)
	}
}

/// Lenient scan for the rate-limit header that tolerates malformed lines.
///
/// Used before strict parsing so the remaining-call count is recorded even when another
/// header line turns out to be malformed.
pub fn scan_rate_limit(block: &str) -> Option<&str> {
	block
		.split("\r\n")
		.skip(1)
		.filter_map(split_line)
		.filter(|(name, _)| name.eq_ignore_ascii_case(RATE_LIMIT_REMAINING_HEADER))
		.map(|(_, value)| value)
		.last()
}

pub(crate) fn find_header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
	headers.iter().find(|(key, _)| key.eq_ignore_ascii_case(name)).map(|(_, value)| value.as_str())
}

pub(crate) fn parse_status_code(status_line: &str) -> Option<u16> {
	status_line.split_whitespace().nth(1)?.parse().ok()
}

fn split_line(line: &str) -> Option<(&str, &str)> {
	let (name, value) = line.split_once(':')?;

	Some((name, value.strip_prefix(' ').unwrap_or(value)))
}
