use ceval_core::parser::{ExpressionParser, Production, Rule};
use nu_ansi_term::{Color, Style};
use pest::Parser;
use reedline::StyledText;

#[derive(Debug)]
struct PaletteItem<'a> {
    name: &'a str,
    fg: Color,
}

const PALETTE: &[PaletteItem] = &[
    PaletteItem { name: "", fg: Color::White },
    PaletteItem { name: "constant", fg: Color::Magenta },
    PaletteItem { name: "number", fg: Color::Cyan },
    PaletteItem { name: "variable", fg: Color::Red },
    PaletteItem { name: "operator", fg: Color::Yellow },
    PaletteItem { name: "punctuation", fg: Color::White },
];

fn color(name: &str) -> Color {
    PALETTE
        .iter()
        .find(|item| item.name == name)
        .unwrap_or(&PALETTE[0])
        .fg
}

fn token_color(rule: Rule, text: &str) -> Color {
    match rule {
        Rule::number_literal => color("number"),
        Rule::identifier if text == "true" || text == "false" => color("constant"),
        Rule::identifier => color("variable"),
        Rule::open_paren | Rule::close_paren | Rule::open_bracket | Rule::close_bracket => {
            color("punctuation")
        }
        _ => color("operator"),
    }
}

/// Colors REPL input by the grammar's leaf tokens.
pub struct Highlighter;

impl reedline::Highlighter for Highlighter {
    fn highlight(&self, line: &str, _: usize) -> StyledText {
        let mut output = StyledText::new();
        let plain = Style::new().fg(PALETTE[0].fg);

        // Incomplete input does not parse; show it unstyled until it does.
        let Ok(pairs) = ExpressionParser::parse(Rule::main, line) else {
            output.push((plain, line.to_string()));
            return output;
        };

        let mut curr_end = 0;
        for pair in pairs.flatten() {
            let rule = pair.as_rule();
            let is_leaf = pair.clone().into_inner().next().is_none();
            if !is_leaf || rule == Rule::EOI || rule.production() == Production::Repetition {
                continue;
            }

            let span = pair.as_span();
            if span.start() > curr_end {
                output.push((plain, line[curr_end..span.start()].to_string()));
            }
            let style = Style::new().fg(token_color(rule, span.as_str()));
            output.push((style, span.as_str().to_string()));
            curr_end = span.end();
        }

        if curr_end < line.len() {
            output.push((plain, line[curr_end..].to_string()));
        }
        output
    }
}
