/// Lower and upper limits of the playback speed multiplier.
pub const MIN_SPEED: f64 = 0.1;
pub const MAX_SPEED: f64 = 2.0;

/// Playback and navigation state for one (or a synced pair of) motion(s).
///
/// Owns the current frame cursor, the play/pause flag and the speed
/// multiplier; viewers mutate it from input events and read `frame()` when
/// drawing. The cursor is fractional so playback accumulates partial frames
/// between redraws.
#[derive(Debug, Clone)]
pub struct Playback {
    cursor: f64,
    num_frames: usize,
    playing: bool,
    speed: f64,
}

impl Playback {
    pub fn new(num_frames: usize) -> Self {
        Playback {
            cursor: 0.0,
            num_frames: num_frames.max(1),
            playing: false,
            speed: 1.0,
        }
    }

    /// Controller for two motions played side by side: both are driven by
    /// one cursor that wraps at the shorter motion's frame count, so neither
    /// ever indexes out of range.
    pub fn synced(a_frames: usize, b_frames: usize) -> Self {
        Playback::new(a_frames.min(b_frames))
    }

    pub fn frame(&self) -> usize {
        self.cursor as usize
    }

    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    /// Step one frame forward, wrapping past the end. Manual stepping always
    /// pauses playback.
    pub fn step_forward(&mut self) {
        self.playing = false;
        self.cursor = ((self.frame() + 1) % self.num_frames) as f64;
    }

    /// Step one frame backward; frame 0 wraps to the last frame.
    pub fn step_backward(&mut self) {
        self.playing = false;
        self.cursor = ((self.frame() as f64 - 1.0).rem_euclid(self.num_frames as f64)).floor();
    }

    /// Advance the cursor by elapsed wall time when playing.
    pub fn advance(&mut self, dt_seconds: f64, fps: f64) {
        if self.playing {
            self.cursor =
                (self.cursor + dt_seconds * fps * self.speed).rem_euclid(self.num_frames as f64);
        }
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }

    /// Adjust the speed multiplier by a delta, clamped to [0.1, 2.0].
    pub fn nudge_speed(&mut self, delta: f64) {
        self.set_speed(self.speed + delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_wraps_after_a_full_cycle() {
        let frames = 7;
        let mut playback = Playback::new(frames);
        for _ in 0..frames {
            playback.step_forward();
        }
        assert_eq!(playback.frame(), 0);
    }

    #[test]
    fn backward_from_zero_lands_on_last_frame() {
        let mut playback = Playback::new(5);
        playback.step_backward();
        assert_eq!(playback.frame(), 4);
    }

    #[test]
    fn stepping_pauses_playback() {
        let mut playback = Playback::new(10);
        playback.toggle();
        assert!(playback.is_playing());
        playback.step_forward();
        assert!(!playback.is_playing());
    }

    #[test]
    fn synced_pair_wraps_at_the_shorter_motion() {
        let mut playback = Playback::synced(5, 3);
        assert_eq!(playback.num_frames(), 3);
        for _ in 0..3 {
            playback.step_forward();
        }
        assert_eq!(playback.frame(), 0);
        playback.step_backward();
        assert_eq!(playback.frame(), 2);
    }

    #[test]
    fn advance_moves_only_while_playing() {
        let mut playback = Playback::new(100);
        playback.advance(1.0, 30.0);
        assert_eq!(playback.frame(), 0);

        playback.toggle();
        playback.advance(1.0, 30.0);
        assert_eq!(playback.frame(), 30);

        // playback wraps too
        playback.advance(3.0, 30.0);
        assert_eq!(playback.frame(), 20);
    }

    #[test]
    fn speed_clamps_to_its_range() {
        let mut playback = Playback::new(10);
        playback.set_speed(5.0);
        assert_eq!(playback.speed(), MAX_SPEED);
        playback.set_speed(0.0);
        assert_eq!(playback.speed(), MIN_SPEED);

        playback.set_speed(1.0);
        playback.nudge_speed(0.25);
        assert!((playback.speed() - 1.25).abs() < 1e-9);
        playback.nudge_speed(10.0);
        assert_eq!(playback.speed(), MAX_SPEED);
    }

    #[test]
    fn half_speed_covers_half_the_frames() {
        let mut playback = Playback::new(100);
        playback.set_speed(0.5);
        playback.toggle();
        playback.advance(1.0, 30.0);
        assert_eq!(playback.frame(), 15);
    }
}
