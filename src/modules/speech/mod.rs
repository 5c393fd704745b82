pub mod input;
pub mod output;

pub use input::{CommandRecognizer, SpeechError, SpeechInput};
pub use output::{CommandSynthesizer, SpeechOutput, Utterance};
