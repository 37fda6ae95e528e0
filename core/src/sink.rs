use crate::state::FrameBuffer;

/// Somewhere to show frames. The CPU hands over the whole FrameBuffer after every clear and
/// every draw, synchronously, so a sink never has to track what changed.
pub trait FrameSink {
    fn present(&mut self, frame: &FrameBuffer);
}

/// Discards every frame; useful for running programs headless
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _frame: &FrameBuffer) {}
}

/// Keeps every frame it is shown
#[derive(Default)]
pub struct RecordingSink {
    pub frames: Vec<FrameBuffer>,
}

impl FrameSink for RecordingSink {
    fn present(&mut self, frame: &FrameBuffer) {
        self.frames.push(*frame);
    }
}
