use crate::script::shell::{escape_double_quoted, var_ref};

/// A value that can be substituted into a download URL pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// Release tag exactly as published, e.g. `v1.30.0`
    Version,
    /// Release tag with one leading `v` removed, e.g. `1.30.0`
    BareVersion,
    Os,
    Arch,
}

impl Placeholder {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "version" => Some(Placeholder::Version),
            "bare_version" => Some(Placeholder::BareVersion),
            "os" => Some(Placeholder::Os),
            "arch" => Some(Placeholder::Arch),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Var(Placeholder),
}

/// Download URL pattern such as `https://dl.k8s.io/release/{version}/bin/{os}/{arch}/kubectl`
///
/// Parsing is total: braces that don't name a known placeholder stay literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl UrlTemplate {
    pub fn parse(input: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(open) = rest.find('{') {
            literal.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let placeholder = after
                .find('}')
                .and_then(|close| Placeholder::from_name(&after[..close]).map(|p| (p, close)));

            match placeholder {
                Some((placeholder, close)) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Var(placeholder));
                    rest = &after[close + 1..];
                }
                None => {
                    // Not a placeholder, keep the brace as text
                    literal.push('{');
                    rest = after;
                }
            }
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self {
            source: input.to_string(),
            segments,
        }
    }

    /// The pattern as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Placeholders in order of appearance
    pub fn placeholders(&self) -> Vec<Placeholder> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Var(p) => Some(*p),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Names inside `{...}` that are not known placeholders
    pub fn unknown_placeholders(&self) -> Vec<String> {
        let mut unknown = Vec::new();
        for segment in &self.segments {
            if let Segment::Literal(text) = segment {
                let mut rest = text.as_str();
                while let Some(open) = rest.find('{') {
                    let after = &rest[open + 1..];
                    match after.find('}') {
                        Some(close) => {
                            unknown.push(after[..close].to_string());
                            rest = &after[close + 1..];
                        }
                        None => {
                            unknown.push(after.to_string());
                            break;
                        }
                    }
                }
            }
        }
        unknown
    }

    /// Substitute concrete values, producing a plain URL
    pub fn expand(&self, version: &str, os: &str, arch: &str) -> String {
        self.render(
            |p| match p {
                Placeholder::Version => version.to_string(),
                Placeholder::BareVersion => bare_version(version).to_string(),
                Placeholder::Os => os.to_string(),
                Placeholder::Arch => arch.to_string(),
            },
            |text| text.to_string(),
        )
    }

    /// Render for the inside of a double-quoted bash string
    ///
    /// The version is fixed now; OS and architecture become references to the
    /// `OS`/`ARCH` variables the script sets after detecting the machine.
    pub fn expand_for_shell(&self, version: &str) -> String {
        self.render(
            |p| match p {
                Placeholder::Version => escape_double_quoted(version),
                Placeholder::BareVersion => escape_double_quoted(bare_version(version)),
                Placeholder::Os => var_ref("OS"),
                Placeholder::Arch => var_ref("ARCH"),
            },
            escape_double_quoted,
        )
    }

    fn render(
        &self,
        mut on_placeholder: impl FnMut(Placeholder) -> String,
        mut on_literal: impl FnMut(&str) -> String,
    ) -> String {
        let mut result = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => result.push_str(&on_literal(text)),
                Segment::Var(p) => result.push_str(&on_placeholder(*p)),
            }
        }
        result
    }
}

/// Strip a single leading `v` from a release tag
pub fn bare_version(version: &str) -> &str {
    version.strip_prefix('v').unwrap_or(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KUBECTL: &str = "https://dl.k8s.io/release/{version}/bin/{os}/{arch}/kubectl";

    #[test]
    fn test_expand_concrete() {
        let template = UrlTemplate::parse(KUBECTL);
        assert_eq!(
            template.expand("v1.30.0", "linux", "amd64"),
            "https://dl.k8s.io/release/v1.30.0/bin/linux/amd64/kubectl"
        );
    }

    #[test]
    fn test_expand_for_shell_uses_runtime_vars() {
        let template = UrlTemplate::parse(KUBECTL);
        assert_eq!(
            template.expand_for_shell("v1.30.0"),
            "https://dl.k8s.io/release/v1.30.0/bin/${OS}/${ARCH}/kubectl"
        );
    }

    #[test]
    fn test_bare_version() {
        let template =
            UrlTemplate::parse("https://x.test/{bare_version}/t_{bare_version}_{os}_{arch}.zip");
        assert_eq!(
            template.expand("v1.9.2", "darwin", "arm64"),
            "https://x.test/1.9.2/t_1.9.2_darwin_arm64.zip"
        );
        assert_eq!(
            template.expand_for_shell("v1.9.2"),
            "https://x.test/1.9.2/t_1.9.2_${OS}_${ARCH}.zip"
        );
        assert_eq!(bare_version("1.0"), "1.0");
        assert_eq!(bare_version("vv1"), "v1");
    }

    #[test]
    fn test_shell_render_escapes_literals_and_version() {
        let template = UrlTemplate::parse("https://x.test/$HOME/{version}/{os}");
        assert_eq!(
            template.expand_for_shell("v1\"`"),
            "https://x.test/\\$HOME/v1\\\"\\`/${OS}"
        );
    }

    #[test]
    fn test_unknown_placeholders_stay_literal() {
        let template = UrlTemplate::parse("https://x.test/{flavor}/{os}/{unterminated");
        assert_eq!(template.placeholders(), vec![Placeholder::Os]);
        assert_eq!(
            template.unknown_placeholders(),
            vec!["flavor".to_string(), "unterminated".to_string()]
        );
        assert_eq!(
            template.expand("v1", "linux", "amd64"),
            "https://x.test/{flavor}/linux/{unterminated"
        );
    }

    #[test]
    fn test_no_placeholders() {
        let template = UrlTemplate::parse("plain");
        assert!(template.placeholders().is_empty());
        assert_eq!(template.expand("v1", "linux", "amd64"), "plain");
        assert_eq!(template.as_str(), "plain");
    }
}
