//! Part and chapter heading recognition for TOC documents
//!
//! TOC documents are written by hand and use several Markdown styles for the
//! same thing. Each style is one entry in an ordered grammar table; the first
//! entry whose pattern matches the trimmed line wins. Lines that match nothing
//! are simply not headings.

use crate::normalize::{remove_parentheses, roman_to_int, strip_links, to_snake_case};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// How a part heading was written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartStyle {
    /// `## **Part I: Name**`
    Bold,
    /// `## Part I — Name` or `## Part I - Name`
    Dash,
    /// `## Part I: Name`
    Colon,
    /// `### Part I: Name`
    SubColon,
}

/// How a chapter heading was written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterStyle {
    /// `### **Chapter 1: Name**`
    BoldHeading,
    /// `### Chapter 1: Name`
    Heading,
    /// `### 1. Name`
    Numbered,
    /// `**Chapter 1: Name**`
    Bold,
}

struct PartGrammar {
    style: PartStyle,
    pattern: Regex,
}

struct ChapterGrammar {
    style: ChapterStyle,
    plain: Regex,
    linked: Regex,
}

static PART_GRAMMARS: LazyLock<Vec<PartGrammar>> = LazyLock::new(|| {
    [
        (PartStyle::Bold, r"(?i)^## \*\*(?:Part|Module) ([IVXLCDM]+): (.+)\*\*"),
        (PartStyle::Dash, r"(?i)^## (?:Part|Module) ([IVXLCDM]+) [—-] (.+)"),
        (PartStyle::Colon, r"(?i)^## (?:Part|Module) ([IVXLCDM]+): (.+)"),
        (PartStyle::SubColon, r"(?i)^### (?:Part|Module) ([IVXLCDM]+): (.+)"),
    ]
    .into_iter()
    .map(|(style, pattern)| PartGrammar { style, pattern: Regex::new(pattern).unwrap() })
    .collect()
});

static CHAPTER_GRAMMARS: LazyLock<Vec<ChapterGrammar>> = LazyLock::new(|| {
    [
        (
            ChapterStyle::BoldHeading,
            r"^(?P<prefix>###+ )\*\*(?i:chapter) (?P<num>\d+): (?P<name>.+?)\*\*\s*$",
            r"^(?P<prefix>###+ )\*\*\[(?i:chapter) (?P<num>\d+): (?P<name>.+?)\]\((?P<target>[^()]+)\)\*\*\s*$",
        ),
        (
            ChapterStyle::Heading,
            r"^(?P<prefix>###+ )(?i:chapter) (?P<num>\d+): (?P<name>.+?)\s*$",
            r"^(?P<prefix>###+ )\[(?i:chapter) (?P<num>\d+): (?P<name>.+?)\]\((?P<target>[^()]+)\)\s*$",
        ),
        (
            ChapterStyle::Numbered,
            r"^(?P<prefix>###+ )(?P<num>\d+)\. (?P<name>.+?)\s*$",
            r"^(?P<prefix>###+ )\[(?P<num>\d+)\. (?P<name>.+?)\]\((?P<target>[^()]+)\)\s*$",
        ),
        (
            ChapterStyle::Bold,
            r"^\*\*(?i:chapter) (?P<num>\d+): (?P<name>.+?)\*\*\s*$",
            r"^\*\*\[(?i:chapter) (?P<num>\d+): (?P<name>.+?)\]\((?P<target>[^()]+)\)\*\*\s*$",
        ),
    ]
    .into_iter()
    .map(|(style, plain, linked)| ChapterGrammar {
        style,
        plain: Regex::new(plain).unwrap(),
        linked: Regex::new(linked).unwrap(),
    })
    .collect()
});

/// A recognized `Part`/`Module` heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartHeading {
    pub style: PartStyle,
    pub numeral: String,
    pub number: u32,
    pub raw_name: String,
}

impl PartHeading {
    /// Name with bracketed annotations removed
    pub fn clean_name(&self) -> String {
        remove_parentheses(&self.raw_name)
    }

    /// Directory name for this part, e.g. `1. basics`
    pub fn folder_name(&self) -> String {
        format!("{}. {}", self.number, to_snake_case(&self.clean_name()))
    }

    /// Short label used in reports, e.g. `Part I: Basics`
    pub fn label(&self) -> String {
        format!("Part {}: {}", self.numeral.to_uppercase(), self.clean_name())
    }
}

/// A recognized chapter heading, plain or already linked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterHeading {
    pub style: ChapterStyle,
    /// Heading marker as written, e.g. `### `; empty for bold-only lines
    pub prefix: String,
    pub number: u32,
    /// Chapter number as written, e.g. `01`; used in names and links
    pub digits: String,
    /// Name as written (inline links stripped for numbered headings)
    pub raw_name: String,
    /// Existing link target when the heading is already a link
    pub target: Option<String>,
}

impl ChapterHeading {
    pub fn is_linked(&self) -> bool {
        self.target.is_some()
    }

    /// Name with bracketed annotations removed
    pub fn clean_name(&self) -> String {
        remove_parentheses(&self.raw_name)
    }

    /// Notebook file name for this chapter, e.g. `1. intro.ipynb`
    pub fn notebook_name(&self, extension: &str) -> String {
        format!("{}. {}.{}", self.digits, to_snake_case(&self.clean_name()), extension)
    }

    /// Title written into the first cell of a scaffolded notebook
    pub fn title(&self) -> String {
        format!("# Chapter {}: {}", self.digits, self.clean_name())
    }

    /// The heading rewritten as a link to `target`, keeping its style
    pub fn linked_form(&self, target: &str) -> String {
        let (prefix, digits, name) = (&self.prefix, &self.digits, &self.raw_name);
        match self.style {
            ChapterStyle::BoldHeading => {
                format!("{prefix}**[Chapter {digits}: {name}]({target})**")
            }
            ChapterStyle::Heading => format!("{prefix}[Chapter {digits}: {name}]({target})"),
            ChapterStyle::Numbered => format!("{prefix}[{digits}. {name}]({target})"),
            ChapterStyle::Bold => format!("**[Chapter {digits}: {name}]({target})**"),
        }
    }
}

/// Any recognized heading line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Heading {
    Part(PartHeading),
    Chapter(ChapterHeading),
}

/// Recognize a part heading
pub fn match_part(line: &str) -> Option<PartHeading> {
    let line = line.trim();
    PART_GRAMMARS.iter().find_map(|grammar| {
        let caps = grammar.pattern.captures(line)?;
        let numeral = caps[1].to_string();
        Some(PartHeading {
            style: grammar.style,
            number: roman_to_int(&numeral),
            numeral,
            raw_name: caps[2].to_string(),
        })
    })
}

/// Recognize a chapter heading in any of its plain or linked forms
pub fn match_chapter(line: &str) -> Option<ChapterHeading> {
    let line = line.trim();
    CHAPTER_GRAMMARS.iter().find_map(|grammar| {
        grammar
            .plain
            .captures(line)
            .or_else(|| grammar.linked.captures(line))
            .and_then(|caps| chapter_from_captures(grammar.style, &caps))
    })
}

fn chapter_from_captures(style: ChapterStyle, caps: &Captures<'_>) -> Option<ChapterHeading> {
    let number = caps["num"].parse().ok()?;
    let name = &caps["name"];
    let raw_name = match style {
        ChapterStyle::Numbered => strip_links(name),
        _ => name.to_string(),
    };

    Some(ChapterHeading {
        style,
        prefix: caps.name("prefix").map(|m| m.as_str().to_string()).unwrap_or_default(),
        number,
        digits: caps["num"].to_string(),
        raw_name,
        target: caps.name("target").map(|m| m.as_str().to_string()),
    })
}

/// Classify a line; part headings take precedence over chapters
pub fn classify(line: &str) -> Option<Heading> {
    match_part(line).map(Heading::Part).or_else(|| match_chapter(line).map(Heading::Chapter))
}

/// Position of a line scan relative to the part headings seen so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScanState {
    #[default]
    NoCurrentPart,
    InPart(PartHeading),
}

impl ScanState {
    /// State after seeing `heading`
    pub fn advance(self, heading: &Heading) -> Self {
        match heading {
            Heading::Part(part) => ScanState::InPart(part.clone()),
            Heading::Chapter(_) => self,
        }
    }

    pub fn current_part(&self) -> Option<&PartHeading> {
        match self {
            ScanState::NoCurrentPart => None,
            ScanState::InPart(part) => Some(part),
        }
    }
}
