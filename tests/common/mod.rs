//! Shared fixtures: minimal PDFs assembled byte-by-byte so tests do not
//! depend on any PDF-writing library.

/// One text item: (text, font size, x, y).
pub type TextItem<'a> = (&'a str, f32, f32, f32);

/// Build a complete single-font PDF with one content stream per page.
/// Offsets in the xref table are computed while serializing, so the
/// output is a structurally valid file.
pub fn build_pdf(pages: &[Vec<TextItem<'_>>]) -> Vec<u8> {
    let page_count = pages.len();
    let first_page_obj = 4;
    let first_content_obj = first_page_obj + page_count;
    let total_objects = 3 + 2 * page_count;

    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", first_page_obj + i))
        .collect();

    let mut objects: Vec<(usize, String)> = vec![
        (1, "<< /Type /Catalog /Pages 2 0 R >>".to_string()),
        (
            2,
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.join(" "),
                page_count
            ),
        ),
        (
            3,
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        ),
    ];

    for i in 0..page_count {
        objects.push((
            first_page_obj + i,
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                first_content_obj + i
            ),
        ));
    }

    for (i, items) in pages.iter().enumerate() {
        let mut stream = String::new();
        for (text, size, x, y) in items {
            let escaped = text
                .replace('\\', "\\\\")
                .replace('(', "\\(")
                .replace(')', "\\)");
            stream.push_str(&format!(
                "BT /F1 {} Tf {} {} Td ({}) Tj ET\n",
                size, x, y, escaped
            ));
        }
        objects.push((
            first_content_obj + i,
            format!(
                "<< /Length {} >>\nstream\n{}endstream",
                stream.len(),
                stream
            ),
        ));
    }

    let mut out: Vec<u8> = b"%PDF-1.4\n".to_vec();
    let mut offsets = vec![0usize; total_objects + 1];
    for (num, body) in &objects {
        offsets[*num] = out.len();
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", num, body).as_bytes());
    }

    let xref_pos = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", total_objects + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for &offset in offsets.iter().skip(1) {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            total_objects + 1,
            xref_pos
        )
        .as_bytes(),
    );
    out
}

/// Single-page document whose trailer carries a standard security
/// handler. The owner and user keys are arbitrary bytes, so the empty
/// password cannot open it.
pub fn encrypted_pdf() -> Vec<u8> {
    let stream = "BT /F1 24 Tf 72 720 Td (Quarterly Figures) Tj ET\n";
    let objects: Vec<(usize, String)> = vec![
        (1, "<< /Type /Catalog /Pages 2 0 R >>".to_string()),
        (2, "<< /Type /Pages /Kids [4 0 R] /Count 1 >>".to_string()),
        (
            3,
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        ),
        (
            4,
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents 5 0 R >>"
                .to_string(),
        ),
        (
            5,
            format!(
                "<< /Length {} >>\nstream\n{}endstream",
                stream.len(),
                stream
            ),
        ),
        (
            6,
            "<< /Filter /Standard /V 1 /R 2 \
             /O <28BF4E5E4E758A4164004E56FFFA01082E2E00B6D0683E802F0CA9FE6453697A> \
             /U <451275C67E589B1E9D4A463AEF0C1D5E8A4164004E56FFFA01082E2E00B6D068> \
             /P -60 >>"
                .to_string(),
        ),
    ];

    let mut out: Vec<u8> = b"%PDF-1.4\n".to_vec();
    let mut offsets = vec![0usize; objects.len() + 1];
    for (num, body) in &objects {
        offsets[*num] = out.len();
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", num, body).as_bytes());
    }

    let xref_pos = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for &offset in offsets.iter().skip(1) {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R /Encrypt 6 0 R \
             /ID [<9FA1B2C3D4E5F60718293A4B5C6D7E8F> <9FA1B2C3D4E5F60718293A4B5C6D7E8F>] >>\n\
             startxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_pos
        )
        .as_bytes(),
    );
    out
}

/// Two-page company report: a large title, numbered headings at two
/// depths, and enough 12pt prose to anchor the body font mode.
pub fn company_report_pdf() -> Vec<u8> {
    let page1: Vec<TextItem<'_>> = vec![
        ("Company Report", 24.0, 72.0, 720.0),
        ("1. Overview", 18.0, 72.0, 680.0),
        ("The year brought steady growth across all regions.", 12.0, 72.0, 650.0),
        ("Operating costs held flat while headcount expanded.", 12.0, 72.0, 634.0),
        ("New market entries performed above expectations.", 12.0, 72.0, 618.0),
        ("Customer retention improved for the third year running.", 12.0, 72.0, 602.0),
        ("1.1 Background", 14.0, 72.0, 570.0),
        ("The company was founded to serve mid-market customers.", 12.0, 72.0, 540.0),
        ("Early products focused on logistics and fulfillment.", 12.0, 72.0, 524.0),
        ("Later expansion added financial reporting tools.", 12.0, 72.0, 508.0),
    ];
    let page2: Vec<TextItem<'_>> = vec![
        ("2. Results", 18.0, 72.0, 720.0),
        ("Revenue grew eighteen percent year over year.", 12.0, 72.0, 690.0),
        ("Gross margin expanded on improved supplier terms.", 12.0, 72.0, 674.0),
        ("Net income doubled against the prior period.", 12.0, 72.0, 658.0),
        ("Cash reserves cover two years of planned investment.", 12.0, 72.0, 642.0),
    ];
    build_pdf(&[page1, page2])
}

/// Marketing-themed document with revenue-adjacent headings.
pub fn marketing_plan_pdf() -> Vec<u8> {
    let page: Vec<TextItem<'_>> = vec![
        ("Marketing Plan", 24.0, 72.0, 720.0),
        ("1. Revenue Forecast", 18.0, 72.0, 680.0),
        ("Campaign spend is expected to return four to one.", 12.0, 72.0, 650.0),
        ("Paid channels remain the largest driver of growth.", 12.0, 72.0, 634.0),
        ("2. Brand Strategy", 18.0, 72.0, 600.0),
        ("Messaging will focus on reliability and support.", 12.0, 72.0, 570.0),
        ("Sponsorships continue in the two largest markets.", 12.0, 72.0, 554.0),
    ];
    build_pdf(&[page])
}

/// Off-topic document to sit at the bottom of a revenue-themed ranking.
pub fn kitchen_handbook_pdf() -> Vec<u8> {
    let page: Vec<TextItem<'_>> = vec![
        ("Kitchen Handbook", 24.0, 72.0, 720.0),
        ("1. Cleaning Schedule", 18.0, 72.0, 680.0),
        ("Surfaces are wiped down at the end of every shift.", 12.0, 72.0, 650.0),
        ("Deep cleaning happens on the last Friday of the month.", 12.0, 72.0, 634.0),
    ];
    build_pdf(&[page])
}
