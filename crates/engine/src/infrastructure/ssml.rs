//! SSML markup for spoken responses.

use mystery_animal_shared::SoundCue;

use crate::infrastructure::config::DEFAULT_SOUND_BASE_URL;

/// Wraps response text with its audio clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsmlRenderer {
    base_url: String,
}

impl SsmlRenderer {
    pub fn new(base_url: &str) -> Self {
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        Self { base_url }
    }

    /// `<speak>` with the clip first, then the text.
    pub fn wrap(&self, cue: SoundCue, text: &str) -> String {
        format!("<speak>{}{}</speak>", self.audio(cue), escape(text))
    }

    /// The clip played after the first sentence.
    pub fn wrap_intro(&self, cue: SoundCue, text: &str) -> String {
        let (first, rest) = match text.find('.') {
            Some(end) => text.split_at(end + 1),
            None => (text, ""),
        };
        format!(
            "<speak>{}{}{}</speak>",
            escape(first),
            self.audio(cue),
            escape(rest)
        )
    }

    pub fn plain(&self, text: &str) -> String {
        format!("<speak>{}</speak>", escape(text))
    }

    fn audio(&self, cue: SoundCue) -> String {
        format!(r#"<audio src="{}{}.mp3"></audio>"#, self.base_url, cue.as_str())
    }
}

impl Default for SsmlRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_SOUND_BASE_URL)
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_comes_before_the_text() {
        let ssml = SsmlRenderer::new("https://sounds.test").wrap(SoundCue::Yes, "Yes, I do.");
        assert_eq!(
            ssml,
            r#"<speak><audio src="https://sounds.test/gameplay_yesA.mp3"></audio>Yes, I do.</speak>"#
        );
    }

    #[test]
    fn intro_audio_follows_the_first_sentence() {
        let ssml = SsmlRenderer::new("https://sounds.test/")
            .wrap_intro(SoundCue::Intro, "Hi there. I'm a mystery animal. Ask away!");
        assert_eq!(
            ssml,
            r#"<speak>Hi there.<audio src="https://sounds.test/intro_intro.mp3"></audio> I'm a mystery animal. Ask away!</speak>"#
        );
    }

    #[test]
    fn intro_without_a_full_stop_keeps_audio_last() {
        let ssml = SsmlRenderer::new("https://sounds.test/").wrap_intro(SoundCue::Intro, "Hello");
        assert!(ssml.starts_with("<speak>Hello<audio"));
    }

    #[test]
    fn markup_characters_are_escaped() {
        let ssml = SsmlRenderer::default().plain("cats & <dogs>");
        assert_eq!(ssml, "<speak>cats &amp; &lt;dogs&gt;</speak>");
    }
}
