use keel_style::{Border, Color, ColorProfile, Style, fit, strip_ansi, visible_width};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_fit_is_exact_width(s in "[a-zA-Z0-9 ]{0,40}", width in 0usize..30) {
        prop_assert_eq!(visible_width(&fit(&s, width)), width);
    }

    #[test]
    fn test_styling_preserves_text(s in "[a-z]{1,20}", fg in 0u8..=255) {
        let out = Style::new()
            .bold()
            .foreground(Color::Ansi(fg))
            .profile(ColorProfile::TrueColor)
            .render(&s);
        prop_assert_eq!(strip_ansi(&out), s);
    }

    #[test]
    fn test_border_lines_share_width(lines in proptest::collection::vec("[a-z]{0,12}", 1..6)) {
        let text = lines.join("\n");
        let out = Style::new().border(Border::normal()).profile(ColorProfile::Ascii).render(&text);
        let widths: Vec<usize> = out.lines().map(visible_width).collect();
        prop_assert!(widths.windows(2).all(|w| w[0] == w[1]));
        prop_assert_eq!(widths.len(), lines.len() + 2);
    }
}
