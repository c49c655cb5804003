pub mod fft;
pub mod normalize;
pub mod periodogram;
pub mod synth;
pub mod welch;
pub mod window;
