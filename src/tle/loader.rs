/// A raw element set as found in a TLE text file.
#[derive(Debug, Clone, PartialEq)]
pub struct TleLines {
    pub name: Option<String>,
    pub line1: String,
    pub line2: String,
}

/// Split TLE text into element sets, accepting both 2-line and 3-line (named) layouts.
pub fn parse_multi_tle(content: &str) -> Vec<TleLines> {
    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim_end())
        .filter(|l| !l.trim().is_empty())
        .collect();

    let mut result = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if lines[i].starts_with("1 ") && i + 1 < lines.len() && lines[i + 1].starts_with("2 ") {
            result.push(TleLines {
                name: None,
                line1: lines[i].to_string(),
                line2: lines[i + 1].to_string(),
            });
            i += 2;
        } else if i + 2 < lines.len()
            && lines[i + 1].starts_with("1 ")
            && lines[i + 2].starts_with("2 ")
        {
            let name = lines[i].trim();
            // Some sources prefix the title line with "0 ".
            let name = name.strip_prefix("0 ").unwrap_or(name);
            result.push(TleLines {
                name: Some(name.to_string()),
                line1: lines[i + 1].to_string(),
                line2: lines[i + 2].to_string(),
            });
            i += 3;
        } else {
            log::debug!("skipping unrecognised TLE line {}", i + 1);
            i += 1;
        }
    }

    result
}
