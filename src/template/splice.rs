use crate::data::{PricePoint, ValuationPoint};
use crate::error::EmbedError;
use serde::Serialize;

//insertion point in the chart page
pub const ANCHOR: &str = "async function loadData() {";

//last line of the inserted block, its presence means the page was already spliced
pub const SKIP_MARKER: &str = "// Original fetch code (now skipped)";

const INDENT: &str = "        ";

//a template split around its single anchor
//prefix ends with the anchor, suffix is everything after it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template<'a> {
    prefix: &'a str,
    suffix: &'a str,
}

impl<'a> Template<'a> {
    //splits the text, rejecting missing, repeated or already spliced anchors
    pub fn parse(text: &'a str) -> Result<Self, EmbedError> {
        if text.contains(SKIP_MARKER) {
            return Err(EmbedError::AlreadyEmbedded(SKIP_MARKER));
        }

        let starts: Vec<usize> = text.match_indices(ANCHOR).map(|(i, _)| i).collect();
        match starts.as_slice() {
            [] => Err(EmbedError::AnchorNotFound(ANCHOR)),
            [start] => {
                let (prefix, suffix) = text.split_at(start + ANCHOR.len());
                Ok(Template { prefix, suffix })
            }
            _ => Err(EmbedError::DuplicateAnchor {
                anchor: ANCHOR,
                count: starts.len(),
            }),
        }
    }

    pub fn prefix(&self) -> &'a str {
        self.prefix
    }

    pub fn suffix(&self) -> &'a str {
        self.suffix
    }

    //prefix + block + suffix, the suffix left in place behind the early return
    pub fn render(&self, block: &InitBlock) -> String {
        let block = block.render();
        let mut out = String::with_capacity(self.prefix.len() + block.len() + self.suffix.len());
        out.push_str(self.prefix);
        out.push_str(&block);
        out.push_str(self.suffix);
        out
    }
}

//the data initialization inserted right after the anchor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitBlock {
    price_json: String,
    valuation_json: String,
}

impl InitBlock {
    pub fn new(prices: &[PricePoint], valuations: &[ValuationPoint]) -> Result<Self, EmbedError> {
        Ok(InitBlock {
            price_json: to_literal(prices)?,
            valuation_json: to_literal(valuations)?,
        })
    }

    pub fn render(&self) -> String {
        let lines = [
            String::new(),
            format!("{INDENT}// Embedded data"),
            format!("{INDENT}btcData = {};", self.price_json),
            format!("{INDENT}mnavData = {};", self.valuation_json),
            String::new(),
            format!("{INDENT}createChart();"),
            format!("{INDENT}updateStats();"),
            format!("{INDENT}return;"),
            String::new(),
            format!("{INDENT}{SKIP_MARKER}"),
        ];
        lines.join("\n")
    }
}

fn to_literal<T: Serialize>(series: &[T]) -> Result<String, EmbedError> {
    Ok(serde_json::to_string(series)?)
}

//splices both series into the template text
pub fn splice(
    text: &str,
    prices: &[PricePoint],
    valuations: &[ValuationPoint],
) -> Result<String, EmbedError> {
    let template = Template::parse(text)?;
    let block = InitBlock::new(prices, valuations)?;
    Ok(template.render(&block))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "<script>\nlet btcData = [];\nasync function loadData() {\n    const res = await fetch('data.csv');\n}\nloadData();\n</script>\n";

    fn sample() -> (Vec<PricePoint>, Vec<ValuationPoint>) {
        (
            vec![PricePoint::new("2023-01-01", 16500.5)],
            vec![ValuationPoint::new("2023-01-01", 16500.5, 1.25, 20625.625, 132500.0, 2.7e9)],
        )
    }

    #[test]
    fn splits_around_anchor() {
        let template = Template::parse(PAGE).unwrap();
        assert!(template.prefix().ends_with(ANCHOR));
        assert!(template.suffix().starts_with("\n    const res"));
        assert_eq!(format!("{}{}", template.prefix(), template.suffix()), PAGE);
    }

    #[test]
    fn inserts_block_once_and_keeps_suffix() {
        let (prices, valuations) = sample();
        let out = splice(PAGE, &prices, &valuations).unwrap();

        let anchor_end = PAGE.find(ANCHOR).unwrap() + ANCHOR.len();
        assert!(out.starts_with(&PAGE[..anchor_end]));
        assert!(out.ends_with(&PAGE[anchor_end..]));
        assert_eq!(out.matches("btcData = [{").count(), 1);
        assert_eq!(out.matches(SKIP_MARKER).count(), 1);
        assert!(out.contains(r#"btcData = [{"date":"2023-01-01","price":16500.5}];"#));
        assert!(out.contains(r#""mnavAdjustedPrice":20625.625"#));

        //early exit sits before the original body
        let ret = out.find("return;").unwrap();
        assert!(ret < out.find("const res").unwrap());
        assert!(out.find("createChart();").unwrap() < out.find("updateStats();").unwrap());
    }

    #[test]
    fn empty_series_render_as_empty_arrays() {
        let out = splice(PAGE, &[], &[]).unwrap();
        assert!(out.contains("btcData = [];\n"));
        assert!(out.contains("mnavData = [];\n"));
    }

    #[test]
    fn missing_anchor_is_rejected() {
        let err = splice("<html></html>", &[], &[]).unwrap_err();
        assert!(matches!(err, EmbedError::AnchorNotFound(_)));
    }

    #[test]
    fn repeated_anchor_is_rejected() {
        let text = format!("{ANCHOR}\n}}\n{ANCHOR}\n}}\n");
        let err = splice(&text, &[], &[]).unwrap_err();
        assert!(matches!(err, EmbedError::DuplicateAnchor { count: 2, .. }));
    }

    #[test]
    fn second_splice_is_rejected() {
        let (prices, valuations) = sample();
        let once = splice(PAGE, &prices, &valuations).unwrap();
        let err = splice(&once, &prices, &valuations).unwrap_err();
        assert!(matches!(err, EmbedError::AlreadyEmbedded(_)));
    }
}
