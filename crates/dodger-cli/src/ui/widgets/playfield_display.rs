use dodger_engine::{Sprite, SpriteKind};
use dodger_training::FrameView;
use ratatui::{
    prelude::{Buffer, Rect},
    style::Color,
    symbols::Marker,
    widgets::{
        Block, Widget,
        canvas::{Canvas, Context, Rectangle},
    },
};

use crate::ui::widgets::color;

/// Agents and obstacles of one frame, drawn on a braille canvas.
#[derive(Debug)]
pub struct PlayfieldDisplay<'a> {
    view: &'a FrameView<'a>,
    block: Option<Block<'a>>,
}

impl<'a> PlayfieldDisplay<'a> {
    pub fn new(view: &'a FrameView<'a>) -> Self {
        Self { view, block: None }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn paint(&self, ctx: &mut Context<'_>) {
        let height = f64::from(self.view.settings.height);
        let leader = self.view.hud.leader.map(|(index, _)| index);

        let obstacles = self
            .view
            .obstacles
            .iter()
            .map(|obstacle| (Sprite::new(SpriteKind::Obstacle, obstacle), false));
        let agents = self
            .view
            .agents
            .iter()
            .enumerate()
            .filter(|(_, agent)| agent.is_alive())
            .map(|(i, agent)| (Sprite::new(SpriteKind::Agent, agent), Some(i) == leader));
        for (sprite, is_leader) in obstacles.chain(agents) {
            ctx.draw(&to_canvas(&sprite, height, sprite_color(sprite.kind, is_leader)));
        }
    }
}

fn sprite_color(kind: SpriteKind, is_leader: bool) -> Color {
    match kind {
        SpriteKind::Obstacle => color::RED,
        SpriteKind::Agent if is_leader => color::YELLOW,
        SpriteKind::Agent => color::GREEN,
    }
}

/// Game y grows downward, canvas y grows upward.
fn to_canvas(sprite: &Sprite, playfield_height: f64, color: Color) -> Rectangle {
    let rect = &sprite.rect;
    Rectangle {
        x: f64::from(rect.left()),
        y: playfield_height - f64::from(rect.bottom()),
        width: f64::from(rect.width()),
        height: f64::from(rect.height()),
        color,
    }
}

impl Widget for PlayfieldDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PlayfieldDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let settings = self.view.settings;
        let mut canvas = Canvas::default()
            .marker(Marker::Braille)
            .background_color(color::SKY)
            .x_bounds([0.0, f64::from(settings.width)])
            .y_bounds([0.0, f64::from(settings.height)])
            .paint(|ctx| self.paint(ctx));
        if let Some(block) = &self.block {
            canvas = canvas.block(block.clone());
        }
        canvas.render(area, buf);
    }
}
