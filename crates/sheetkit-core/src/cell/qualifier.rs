//! Sheet qualifier stripping
//!
//! Splits "Sheet1:Sheet2!A1:B2", "Sheet1!A1:Sheet2!B2" and "[1]Sheet1!A1" into
//! sheet names, external-link markers and the bare address body.
//!
//! Stripping is lenient. Callers that want strict behavior parse the body
//! afterwards.

/// The parts of a sheet-qualified address or range
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetQualifiers {
    /// First (or only) sheet name
    pub sheet1: Option<String>,
    /// The address or range with all qualifiers removed
    pub body: String,
    /// Last sheet of a 3-D reference
    pub sheet2: Option<String>,
    /// External-workbook marker of the first sheet, brackets included ("[1]")
    pub external_link1: Option<String>,
    /// External-workbook marker of the second sheet, brackets included
    pub external_link2: Option<String>,
}

impl SheetQualifiers {
    /// True when the text carried no sheet or external-link qualifier
    pub fn is_unqualified(&self) -> bool {
        self.sheet1.is_none()
            && self.sheet2.is_none()
            && self.external_link1.is_none()
            && self.external_link2.is_none()
    }
}

/// Body text that is an error literal rather than a qualified reference
const REF_ERROR: &str = "#REF!";

/// Split sheet qualifiers and external-link markers off an address or range
///
/// Never fails. Anything that cannot be interpreted is left in place.
///
/// ```
/// use sheetkit_core::cell::strip_sheet_qualifiers;
///
/// let q = strip_sheet_qualifiers("Sheet1:Sheet2!A1:B2");
/// assert_eq!(q.sheet1.as_deref(), Some("Sheet1"));
/// assert_eq!(q.sheet2.as_deref(), Some("Sheet2"));
/// assert_eq!(q.body, "A1:B2");
/// ```
pub fn strip_sheet_qualifiers(text: &str) -> SheetQualifiers {
    let mut sheet1 = None;
    let mut sheet2 = None;
    let mut body = text.to_string();

    if let Some(bang) = text.find('!') {
        let region = &text[..bang];
        match region.find(':') {
            Some(colon) => {
                sheet1 = Some(region[..colon].to_string());
                sheet2 = Some(region[colon + 1..].to_string());
            }
            None => sheet1 = Some(region.to_string()),
        }
        body = text[bang + 1..].to_string();
    }

    // The second endpoint may carry its own qualifier: "A1:Sheet2!B2"
    if let Some(bang) = body.find('!') {
        if body != REF_ERROR {
            let start = body.find(':').map(|c| c + 1).unwrap_or(0);
            if start <= bang {
                sheet2 = Some(body[start..bang].to_string());
                body = format!("{}{}", &body[..start], &body[bang + 1..]);
            }
        }
    }

    let (sheet1, external_link1) = split_external_link(sheet1);
    let (sheet2, external_link2) = split_external_link(sheet2);

    SheetQualifiers {
        sheet1,
        body,
        sheet2,
        external_link1,
        external_link2,
    }
}

fn split_external_link(sheet: Option<String>) -> (Option<String>, Option<String>) {
    let Some(sheet) = sheet else {
        return (None, None);
    };

    let link = sheet.find('[').and_then(|open| {
        sheet[open..]
            .find(']')
            .map(|close| sheet[open..open + close + 1].to_string())
    });

    let name = match &link {
        Some(link) => sheet.replacen(link.as_str(), "", 1),
        None => sheet,
    };
    let name = if name.is_empty() { None } else { Some(name) };
    (name, link)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unqualified() {
        let q = strip_sheet_qualifiers("A1:B2");
        assert_eq!(q.body, "A1:B2");
        assert!(q.is_unqualified());
    }

    #[test]
    fn test_single_sheet() {
        let q = strip_sheet_qualifiers("Sheet1!$A$1");
        assert_eq!(q.sheet1.as_deref(), Some("Sheet1"));
        assert_eq!(q.sheet2, None);
        assert_eq!(q.body, "$A$1");
    }

    #[test]
    fn test_three_d_range() {
        let q = strip_sheet_qualifiers("Sheet1:Sheet2!A1:B2");
        assert_eq!(
            q,
            SheetQualifiers {
                sheet1: Some("Sheet1".into()),
                body: "A1:B2".into(),
                sheet2: Some("Sheet2".into()),
                external_link1: None,
                external_link2: None,
            }
        );
    }

    #[test]
    fn test_second_endpoint_qualifier() {
        let q = strip_sheet_qualifiers("Sheet1!A1:Sheet3!C4");
        assert_eq!(q.sheet1.as_deref(), Some("Sheet1"));
        assert_eq!(q.sheet2.as_deref(), Some("Sheet3"));
        assert_eq!(q.body, "A1:C4");
    }

    #[test]
    fn test_external_links() {
        let q = strip_sheet_qualifiers("[1]Budget:[2]Actuals!B2");
        assert_eq!(q.sheet1.as_deref(), Some("Budget"));
        assert_eq!(q.external_link1.as_deref(), Some("[1]"));
        assert_eq!(q.sheet2.as_deref(), Some("Actuals"));
        assert_eq!(q.external_link2.as_deref(), Some("[2]"));
        assert_eq!(q.body, "B2");

        // link to a workbook-level name leaves no sheet
        let q = strip_sheet_qualifiers("[3]!Total");
        assert_eq!(q.sheet1, None);
        assert_eq!(q.external_link1.as_deref(), Some("[3]"));
        assert_eq!(q.body, "Total");
    }

    #[test]
    fn test_ref_error_body_is_kept() {
        let q = strip_sheet_qualifiers("Sheet1!#REF!");
        assert_eq!(q.sheet1.as_deref(), Some("Sheet1"));
        assert_eq!(q.body, "#REF!");
    }

    #[test]
    fn test_malformed_input_is_lenient() {
        let q = strip_sheet_qualifiers("[1Sheet!A1");
        assert_eq!(q.sheet1.as_deref(), Some("[1Sheet"));
        assert_eq!(q.external_link1, None);

        let q = strip_sheet_qualifiers("!");
        assert_eq!(q.sheet1, None);
        assert_eq!(q.body, "");
    }
}
