use nom::{
    bytes::complete::tag,
    character::complete::digit1,
    combinator::{all_consuming, map_res, verify},
    multi::separated_list1,
    sequence::preceded,
    IResult,
};

/// Classified link name. Synthetic names order before natural ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Synthetic(u64),
    Natural(String),
}

impl Symbol {
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Symbol::Synthetic(_))
    }
}

fn canonical_digits(digits: &str) -> bool {
    digits == "0" || !digits.starts_with('0')
}

fn synthetic<'a>(prefix: &'a str) -> impl FnMut(&'a str) -> IResult<&'a str, u64> + 'a {
    preceded(
        tag(prefix),
        map_res(verify(digit1, canonical_digits), |digits: &str| {
            digits.parse::<u64>()
        }),
    )
}

/// A name is synthetic only when it is exactly `<prefix><digits>` with no
/// leading zeros; anything else orders as a natural name.
pub fn classify(prefix: &str, name: &str) -> Symbol {
    match all_consuming(synthetic(prefix))(name) {
        Ok((_, index)) => Symbol::Synthetic(index),
        Err(_) => Symbol::Natural(name.to_string()),
    }
}

pub fn synthetic_name(prefix: &str, index: u64) -> String {
    format!("{prefix}{index}")
}

/// Parses a cache key into its synthetic indices. Keys that `compile` can
/// derive are empty or list strictly increasing synthetic names.
pub fn parse_cache_key(prefix: &str, key: &str) -> Result<Vec<u64>, String> {
    if key.is_empty() {
        return Ok(Vec::new());
    }
    let (_, indices) = all_consuming(separated_list1(tag(","), synthetic(prefix)))(key)
        .map_err(|err| format!("expected comma-separated `{prefix}<n>` names ({err})"))?;
    if let Some(pair) = indices.windows(2).find(|pair| pair[0] >= pair[1]) {
        return Err(format!(
            "`{}` does not follow `{}`; synthetic names must be strictly increasing",
            synthetic_name(prefix, pair[1]),
            synthetic_name(prefix, pair[0]),
        ));
    }
    Ok(indices)
}
