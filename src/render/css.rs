//! CSS file assembly: header comment and selector blocks.

use std::fmt::Write;

use crate::discovery::ThemeTarget;

use super::flatten::Declaration;

/// Render one `selector { ... }` block.
pub fn render_block(selector: &str, declarations: &[Declaration]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {{", selector);
    for decl in declarations {
        let _ = writeln!(out, "  {}", decl);
    }
    out.push_str("}\n");
    out
}

/// Render the complete stylesheet for a theme.
///
/// Scoped themes get a `[data-brand][data-theme]` block; the default theme
/// additionally repeats its declarations in a bare `:root` block. A theme
/// with no brand/mode is emitted as `:root` only.
pub fn render_css(
    theme_name: &str,
    target: &ThemeTarget,
    is_default: bool,
    declarations: &[Declaration],
) -> String {
    let mut out = String::new();
    out.push_str("/**\n");
    out.push_str(" * Do not edit directly, this file was generated by muka-tokens.\n");
    let _ = writeln!(out, " * Theme: {}", theme_name);
    out.push_str(" */\n\n");

    out.push_str(&render_block(&target.selector(), declarations));

    if is_default && *target != ThemeTarget::Root {
        out.push('\n');
        out.push_str(&render_block(":root", declarations));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decls() -> Vec<Declaration> {
        vec![
            Declaration::new("color-bg", "#fff"),
            Declaration::new("color-fg", "#000"),
        ]
    }

    #[test]
    fn test_render_block() {
        assert_eq!(
            render_block(":root", &decls()),
            ":root {\n  --color-bg: #fff;\n  --color-fg: #000;\n}\n"
        );
    }

    #[test]
    fn test_root_only_theme() {
        let css = render_css("demo", &ThemeTarget::Root, true, &decls());
        assert_eq!(css.matches(":root {").count(), 1);
        assert!(css.contains(" * Theme: demo\n"));
    }

    #[test]
    fn test_scoped_default_theme_gets_root_fallback() {
        let target = ThemeTarget::Scoped {
            brand: "muka".to_string(),
            mode: "light".to_string(),
        };
        let css = render_css("muka-light", &target, true, &decls());

        assert!(css.contains("[data-brand=\"muka\"][data-theme=\"light\"] {\n  --color-bg: #fff;"));
        assert!(css.contains("\n:root {\n  --color-bg: #fff;\n  --color-fg: #000;\n}\n"));
    }

    #[test]
    fn test_scoped_non_default_theme_has_no_root() {
        let target = ThemeTarget::Scoped {
            brand: "muka".to_string(),
            mode: "dark".to_string(),
        };
        let css = render_css("muka-dark", &target, false, &decls());
        assert!(!css.contains(":root"));
    }
}
