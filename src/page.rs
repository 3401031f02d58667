//! Portfolio content and its layout as a scrollable page
//!
//! Content is plain serde data, either the bundled sample or a JSON file. The
//! layout flattens it into terminal rows at a given width and records where
//! every section and revealable element landed, so observers can measure them.

use crate::accordion::Accordion;
use crate::error::{AppError, Result};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUILTIN_PORTFOLIO: &str = include_str!("../assets/portfolio.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub owner: String,
    pub tagline: String,
    pub sections: Vec<SectionContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionContent {
    pub id: String,
    pub nav_label: String,
    pub title: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Text {
        body: String,
    },
    Card {
        title: String,
        body: String,
    },
    Skill {
        name: String,
        level: u8,
    },
    Project {
        title: String,
        summary: String,
        #[serde(default)]
        tech: Vec<String>,
        #[serde(default)]
        image: Option<String>,
    },
    Contact {
        label: String,
        value: String,
    },
    Button {
        label: String,
        action: Action,
    },
}

/// Capability a button carries, assigned in content rather than inferred
/// from its label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    DownloadCv,
    ContactForm,
    ScrollToTop,
}

impl Portfolio {
    pub fn builtin() -> Result<Self> {
        serde_json::from_str(BUILTIN_PORTFOLIO)
            .map_err(|e| AppError::ContentError(format!("bundled portfolio: {}", e)))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AppError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let portfolio: Portfolio = serde_json::from_str(&content)
            .map_err(|e| AppError::ContentError(format!("{}: {}", path.display(), e)))?;

        if portfolio.sections.is_empty() {
            return Err(AppError::ContentError(format!(
                "{}: portfolio has no sections",
                path.display()
            )));
        }
        Ok(portfolio)
    }

    /// Number of project blocks, which is the accordion size
    pub fn project_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| &s.blocks)
            .filter(|b| matches!(b, Block::Project { .. }))
            .count()
    }
}

/// Index of a revealable/lazy element, stable across relayouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementKey(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Card,
    Skill,
    Project,
    Contact,
    Image,
}

impl ElementKind {
    pub fn reveals(&self) -> bool {
        !matches!(self, ElementKind::Image)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    Blank,
    Hero,
    Tagline,
    SectionTitle,
    Text,
    CardTitle,
    CardBody,
    Skill { level: u8 },
    ProjectTitle,
    ProjectBody,
    TechToggle { open: bool },
    TechDetail,
    Image { name: String },
    Contact,
    Button,
    Footer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAction {
    Trigger(Action),
    ToggleTech(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLine {
    pub text: String,
    pub kind: LineKind,
    pub element: Option<ElementKey>,
    pub action: Option<LineAction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionLayout {
    pub id: String,
    pub top_row: usize,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementLayout {
    pub key: ElementKey,
    pub kind: ElementKind,
    pub top_row: usize,
    pub rows: usize,
}

/// Floating glyph drawn over the hero with a parallax offset
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    pub row: usize,
    /// Horizontal position as a fraction of the page width
    pub column_fraction: f64,
    pub glyph: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    pub width: u16,
    pub lines: Vec<PageLine>,
    pub sections: Vec<SectionLayout>,
    pub elements: Vec<ElementLayout>,
    pub decorations: Vec<Decoration>,
}

struct LayoutBuilder {
    width: usize,
    lines: Vec<PageLine>,
    elements: Vec<ElementLayout>,
    next_element: usize,
}

impl LayoutBuilder {
    fn push(&mut self, text: impl Into<String>, kind: LineKind) {
        self.lines.push(PageLine {
            text: text.into(),
            kind,
            element: None,
            action: None,
        });
    }

    fn push_wrapped(&mut self, text: &str, indent: usize, kind: LineKind) {
        let width = self.width.saturating_sub(indent).max(10);
        let pad = " ".repeat(indent);
        for line in textwrap::wrap(text, width) {
            self.push(format!("{}{}", pad, line), kind.clone());
        }
    }

    fn blank(&mut self) {
        self.push("", LineKind::Blank);
    }

    fn row(&self) -> usize {
        self.lines.len()
    }

    /// Tag the lines pushed since `start` as one element
    fn element(&mut self, kind: ElementKind, start: usize) -> ElementKey {
        let key = ElementKey(self.next_element);
        self.next_element += 1;
        for line in &mut self.lines[start..] {
            line.element = Some(key);
        }
        self.elements.push(ElementLayout {
            key,
            kind,
            top_row: start,
            rows: self.lines.len() - start,
        });
        key
    }

    fn set_action(&mut self, action: LineAction) {
        if let Some(line) = self.lines.last_mut() {
            line.action = Some(action);
        }
    }
}

impl PageLayout {
    pub fn build(portfolio: &Portfolio, width: u16, accordion: &Accordion) -> Self {
        let mut builder = LayoutBuilder {
            width: (width as usize).saturating_sub(crate::constants::PAGE_MARGIN_WIDTH * 2),
            lines: Vec::new(),
            elements: Vec::new(),
            next_element: 0,
        };
        let mut sections = Vec::new();
        let mut project_idx = 0;

        for (section_idx, section) in portfolio.sections.iter().enumerate() {
            let top_row = builder.row();
            builder.blank();

            if section_idx == 0 {
                builder.blank();
                builder.push(portfolio.owner.clone(), LineKind::Hero);
                builder.push(portfolio.tagline.clone(), LineKind::Tagline);
                builder.blank();
            }
            builder.push(section.title.clone(), LineKind::SectionTitle);
            builder.blank();

            for block in &section.blocks {
                layout_block(&mut builder, block, &mut project_idx, accordion);
            }

            builder.blank();
            sections.push(SectionLayout {
                id: section.id.clone(),
                top_row,
                rows: builder.row() - top_row,
            });
        }

        builder.push(
            format!("© {} {}", chrono::Local::now().year(), portfolio.owner),
            LineKind::Footer,
        );

        let decorations = hero_decorations(sections.first());

        PageLayout {
            width,
            lines: builder.lines,
            sections,
            elements: builder.elements,
            decorations,
        }
    }

    pub fn total_rows(&self) -> usize {
        self.lines.len()
    }

    pub fn section(&self, id: &str) -> Option<&SectionLayout> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Index of the section covering a page row
    pub fn section_index_at_row(&self, row: usize) -> Option<usize> {
        self.sections
            .iter()
            .position(|s| s.top_row <= row && row < s.top_row + s.rows)
    }

    pub fn element(&self, key: ElementKey) -> Option<&ElementLayout> {
        self.elements.iter().find(|e| e.key == key)
    }

    /// Largest scroll offset. The page may scroll until its last row sits
    /// mid-viewport, so short trailing sections can still reach the top band.
    pub fn max_scroll(&self, viewport_rows: usize) -> usize {
        self.total_rows().saturating_sub(viewport_rows / 2)
    }
}

fn layout_block(
    builder: &mut LayoutBuilder,
    block: &Block,
    project_idx: &mut usize,
    accordion: &Accordion,
) {
    match block {
        Block::Text { body } => {
            builder.push_wrapped(body, 0, LineKind::Text);
            builder.blank();
        }
        Block::Card { title, body } => {
            let start = builder.row();
            builder.push(title.clone(), LineKind::CardTitle);
            builder.push_wrapped(body, 2, LineKind::CardBody);
            builder.element(ElementKind::Card, start);
            builder.blank();
        }
        Block::Skill { name, level } => {
            let start = builder.row();
            builder.push(name.clone(), LineKind::Skill {
                level: (*level).min(100),
            });
            builder.element(ElementKind::Skill, start);
        }
        Block::Project {
            title,
            summary,
            tech,
            image,
        } => {
            let idx = *project_idx;
            *project_idx += 1;
            let open = accordion.is_open(idx);

            let start = builder.row();
            builder.push(title.clone(), LineKind::ProjectTitle);
            builder.push_wrapped(summary, 2, LineKind::ProjectBody);
            builder.push("Tech stack", LineKind::TechToggle { open });
            builder.set_action(LineAction::ToggleTech(idx));
            if open {
                for item in tech {
                    builder.push(format!("    • {}", item), LineKind::TechDetail);
                }
            }
            builder.element(ElementKind::Project, start);

            if let Some(name) = image {
                let start = builder.row();
                for _ in 0..crate::constants::IMAGE_PLACEHOLDER_ROWS {
                    builder.push("", LineKind::Image { name: name.clone() });
                }
                builder.element(ElementKind::Image, start);
            }
            builder.blank();
        }
        Block::Contact { label, value } => {
            let start = builder.row();
            builder.push(format!("{:<10} {}", label, value), LineKind::Contact);
            builder.element(ElementKind::Contact, start);
        }
        Block::Button { label, action } => {
            builder.blank();
            builder.push(format!("[ {} ]", label), LineKind::Button);
            builder.set_action(LineAction::Trigger(*action));
        }
    }
}

fn hero_decorations(hero: Option<&SectionLayout>) -> Vec<Decoration> {
    let Some(hero) = hero else {
        return Vec::new();
    };
    let glyphs = ["◯", "✦", "●", "◇"];
    let fractions = [0.82, 0.12, 0.68, 0.93];

    glyphs
        .iter()
        .zip(fractions)
        .enumerate()
        .map(|(idx, (glyph, column_fraction))| Decoration {
            row: hero.top_row + 1 + (idx * 2) % hero.rows.max(1),
            column_fraction,
            glyph: *glyph,
        })
        .collect()
}
