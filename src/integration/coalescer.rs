/// Collects what one loop turn asked of the terminal
///
/// Several resizes collapse into the last one, and any number of render
/// requests collapse into a single draw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coalescer {
    forced: bool,
    frames: usize,
    requests: usize,
    resize: Option<(u16, u16)>,
}

impl Coalescer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A turn that draws no matter what, e.g. the first one.
    pub fn forced() -> Self {
        Self {
            forced: true,
            ..Self::default()
        }
    }

    /// The terminal's frame clock ticked.
    pub fn frame(&mut self) {
        self.frames += 1;
    }

    /// A command asked for a redraw.
    pub fn request(&mut self) {
        self.requests += 1;
    }

    /// Records a resize; only the last one of the turn survives.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.resize = Some((width, height));
    }

    pub fn take_resize(&mut self) -> Option<(u16, u16)> {
        self.resize.take()
    }

    #[inline]
    pub fn should_render(&self) -> bool {
        self.forced || self.frames > 0 || self.requests > 0
    }
}
