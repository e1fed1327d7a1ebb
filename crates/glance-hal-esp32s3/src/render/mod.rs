pub mod panel;

use epd2in7::FrameBuffer;
use glance_core::render::Screen;

pub trait FrameRenderer {
    fn render(&mut self, screen: Screen<'_>, frame: &mut FrameBuffer);
}
