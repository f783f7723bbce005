use dodger_training::Hud;
use ratatui::{
    prelude::{Buffer, Rect},
    text::Line,
    widgets::{Block, Paragraph, Widget},
};

use crate::ui::widgets::style;

#[derive(Debug)]
pub struct HudDisplay<'a> {
    hud: &'a Hud,
    frame: u64,
    block: Option<Block<'a>>,
}

impl<'a> HudDisplay<'a> {
    pub fn new(hud: &'a Hud, frame: u64) -> Self {
        Self {
            hud,
            frame,
            block: None,
        }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }
}

impl Widget for HudDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let hud = self.hud;
        let leader = match hud.leader {
            Some((index, score)) => format!("{score:.0}_{index}"),
            None => "-".to_owned(),
        };
        let lines = vec![
            Line::from(format!("Generation : {}", hud.generation)),
            Line::from(format!("Alive : {}", hud.alive)),
            Line::from(format!("Score&Index : {leader}")),
            Line::from(format!("Global best score : {:.0}", hud.global_best_score)),
            Line::from(format!("Frame : {}", self.frame)),
            Line::from(""),
            Line::styled("Esc  next generation", style::HINT),
            Line::styled("q    quit", style::HINT),
        ];
        let mut paragraph = Paragraph::new(lines).style(style::DEFAULT);
        if let Some(block) = self.block {
            paragraph = paragraph.block(block);
        }
        paragraph.render(area, buf);
    }
}
