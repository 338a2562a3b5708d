use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};

use super::error::{Error, Result};
use super::markers::Markers;
use super::meal_plan::MealPlanParser;
use crate::lang::Language;
use crate::menu::MealPlan;

/// Feeds html5ever tokens into the [`MealPlanParser`] event vocabulary.
///
/// Adjacent character tokens are buffered and flushed as one text run (the
/// tokenizer may split a run around character references), end tags only
/// flush the buffer, and the first parse failure sticks: later tokens are
/// drained without touching the state machine so no partial plan escapes.
struct PlanSink {
    parser: MealPlanParser,
    pending_text: String,
    failure: Option<Error>,
}

impl PlanSink {
    fn new(markers: &'static Markers) -> Self {
        Self {
            parser: MealPlanParser::new(markers),
            pending_text: String::new(),
            failure: None,
        }
    }

    fn flush_text(&mut self) {
        if self.pending_text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.pending_text);
        if let Err(e) = self.parser.text(&text) {
            self.failure = Some(e);
        }
    }

    fn into_plan(mut self) -> Result<MealPlan> {
        self.flush_text();
        match self.failure {
            Some(e) => Err(e),
            None => Ok(self.parser.finish()),
        }
    }
}

impl TokenSink for PlanSink {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        if self.failure.is_some() {
            return TokenSinkResult::Continue;
        }
        match token {
            Token::CharacterTokens(text) => self.pending_text.push_str(&text),
            Token::NullCharacterToken => self.pending_text.push('\u{0}'),
            Token::TagToken(tag) => {
                self.flush_text();
                if self.failure.is_none() && tag.kind == TagKind::StartTag {
                    self.parser.start_tag(&tag.name, !tag.attrs.is_empty());
                }
            }
            Token::CommentToken(_) | Token::DoctypeToken(_) => self.flush_text(),
            Token::EOFToken => self.flush_text(),
            Token::ParseError(_) => {}
        }
        TokenSinkResult::Continue
    }
}

/// Tokenizes the meal plan markup and rebuilds the structured plan for the
/// given language.
pub fn parse_meal_plan(html: &str, language: Language) -> Result<MealPlan> {
    let sink = PlanSink::new(Markers::for_language(language));
    let mut input = BufferQueue::new();
    input.push_back(StrTendril::from(html));

    let mut tokenizer = Tokenizer::new(sink, TokenizerOpts::default());
    let _ = tokenizer.feed(&mut input);
    tokenizer.end();

    tokenizer.sink.into_plan()
}
