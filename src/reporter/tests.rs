//! Tests for report page construction.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::collector::{collect_page, CollectOptions, DesignInventory};
    use crate::config::ReportConfig;
    use crate::document::{Document, Mixed, NodeId, NodeKind, Paint, TextAlign};
    use crate::fonts::{FontCatalog, FontError, FontName};
    use crate::reporter::{Reporter, CONTAINER_NAME};
    use crate::test_support::{component, document, rect, styled_text, text};
    use crate::DsgError;

    fn catalog(extra: &[(&str, &str)]) -> FontCatalog {
        let mut fonts = FontCatalog::new([
            FontName::new("Inter", "Regular"),
            FontName::new("Inter", "Bold"),
        ]);
        for (family, style) in extra {
            fonts.insert(FontName::new(*family, *style));
        }
        fonts
    }

    fn inventory(doc: &Document) -> DesignInventory {
        collect_page(doc, &NodeId::new("0:1"), &CollectOptions::default())
    }

    fn names(doc: &Document, parent: &NodeId) -> Vec<String> {
        doc.children(parent)
            .iter()
            .filter_map(|id| doc.get(id))
            .map(|n| n.name.clone())
            .collect()
    }

    fn characters(doc: &Document, id: &NodeId) -> String {
        match &doc.get(id).map(|n| &n.kind) {
            Some(NodeKind::Text(props)) => props.characters.clone(),
            other => panic!("expected text node, got {other:?}"),
        }
    }

    fn named(doc: &Document, root: &NodeId, name: &str) -> NodeId {
        doc.find_one(root, |n| n.name == name)
            .unwrap_or_else(|| panic!("no node named {name}"))
    }

    #[tokio::test]
    async fn builds_sections_in_fixed_order() {
        let mut doc = document(vec![
            rect("1:1", 1.0, 0.0, 0.0),
            rect("1:2", 1.0, 0.0, 0.0),
            rect("1:3", 0.0, 0.0, 1.0),
            text("1:4", "Inter", "Regular", 16.0, "Hello"),
            component("2:1", "Button", 80.0, vec![]),
        ]);
        let inv = inventory(&doc);
        let fonts = catalog(&[]);
        let config = ReportConfig::default();

        let outcome = Reporter::new(&config, &fonts, Duration::from_secs(1))
            .generate(&mut doc, &inv)
            .await
            .expect("report");

        assert_eq!(doc.get(&outcome.page).unwrap().name, "Auto Design System");
        assert_eq!(doc.current_page(), &outcome.page);
        assert_eq!(names(&doc, &outcome.page), vec![CONTAINER_NAME]);
        assert_eq!(
            names(&doc, &outcome.container),
            vec!["Colors", "Typography", "Components"]
        );
        assert_eq!(outcome.stats.colors, 2);
        assert_eq!(outcome.stats.text_styles, 1);
        assert_eq!(outcome.stats.components, 1);
        assert!(outcome.skipped_styles.is_empty());

        let container = doc.get(&outcome.container).unwrap();
        assert_eq!((container.x, container.y), (40.0, 40.0));
        assert_eq!(container.width, 1400.0);
        match &container.kind {
            NodeKind::Frame(props) => assert!(props.fills.is_empty()),
            other => panic!("unexpected container kind {other:?}"),
        }
    }

    #[tokio::test]
    async fn color_items_show_swatch_and_usage() {
        let mut doc = document(vec![rect("1:1", 1.0, 0.0, 0.0), rect("1:2", 1.0, 0.0, 0.0)]);
        let inv = inventory(&doc);
        let fonts = catalog(&[]);
        let config = ReportConfig::default();

        let outcome = Reporter::new(&config, &fonts, Duration::from_secs(1))
            .generate(&mut doc, &inv)
            .await
            .expect("report");

        let item = named(&doc, &outcome.container, "#FF0000");
        let children = doc.children(&item).to_vec();
        assert_eq!(children.len(), 2);

        let swatch = doc.get(&children[0]).unwrap();
        assert_eq!((swatch.width, swatch.height), (120.0, 120.0));
        match &swatch.kind {
            NodeKind::Shape(shape) => {
                assert_eq!(shape.corner_radius, 8.0);
                assert_eq!(shape.fills.len(), 1);
                assert_eq!(
                    shape.fills[0].visible_solid_color().map(|c| (c.r, c.g, c.b)),
                    Some((1.0, 0.0, 0.0))
                );
            }
            other => panic!("unexpected swatch kind {other:?}"),
        }

        assert_eq!(characters(&doc, &children[1]), "#FF0000\n2 uses");
        let label = doc.get(&children[1]).unwrap();
        assert_eq!((label.width, label.height), (120.0, 40.0));
        assert_eq!(label.y, 130.0);
        if let NodeKind::Text(props) = &label.kind {
            assert_eq!(props.text_align, TextAlign::Center);
        }
    }

    #[tokio::test]
    async fn typography_items_use_their_own_font() {
        let mut doc = document(vec![text("1:1", "Roboto", "Medium", 24.0, "Headline")]);
        let inv = inventory(&doc);
        let fonts = catalog(&[("Roboto", "Medium")]);
        let config = ReportConfig::default();

        let outcome = Reporter::new(&config, &fonts, Duration::from_secs(1))
            .generate(&mut doc, &inv)
            .await
            .expect("report");

        let item = named(&doc, &outcome.container, "Roboto Medium 24px");
        let children = doc.children(&item).to_vec();
        let sample = doc.get(&children[0]).unwrap();
        match &sample.kind {
            NodeKind::Text(props) => {
                assert_eq!(props.characters, "Headline");
                assert_eq!(props.font_name, Mixed::Uniform(FontName::new("Roboto", "Medium")));
                assert_eq!(props.font_size, Mixed::Uniform(24.0));
            }
            other => panic!("unexpected sample kind {other:?}"),
        }

        assert_eq!(characters(&doc, &children[1]), "Roboto Medium • 24px • 1 uses");
        match &doc.get(&children[1]).unwrap().kind {
            NodeKind::Text(props) => {
                assert_eq!(props.font_size, Mixed::Uniform(12.0));
                let gray = props.fills.first().and_then(Paint::visible_solid_color);
                assert_eq!(gray.map(|c| (c.r, c.g, c.b)), Some((0.5, 0.5, 0.5)));
            }
            other => panic!("unexpected detail kind {other:?}"),
        }
    }

    #[tokio::test]
    async fn unavailable_style_font_is_skipped() {
        let mut doc = document(vec![
            text("1:1", "Inter", "Regular", 16.0, "Body"),
            text("1:2", "Papyrus", "Regular", 20.0, "Fancy"),
        ]);
        let inv = inventory(&doc);
        let fonts = catalog(&[]);
        let config = ReportConfig::default();

        let outcome = Reporter::new(&config, &fonts, Duration::from_secs(1))
            .generate(&mut doc, &inv)
            .await
            .expect("report");

        assert_eq!(outcome.skipped_styles, vec![FontName::new("Papyrus", "Regular")]);
        assert_eq!(outcome.stats.text_styles, 2);
        let typography = named(&doc, &outcome.container, "Typography");
        assert_eq!(
            names(&doc, &typography),
            vec!["Typography", "Inter Regular 16px"]
        );
    }

    #[tokio::test]
    async fn skipped_style_leaves_other_sections_intact() {
        let mut doc = document(vec![
            rect("1:1", 0.0, 0.5, 1.0),
            text("1:2", "Papyrus", "Regular", 20.0, "Fancy"),
            text("1:3", "Inter", "Regular", 12.0, "Caption"),
            component("2:1", "Badge", 64.0, vec![]),
        ]);
        let inv = inventory(&doc);
        let fonts = catalog(&[]);
        let config = ReportConfig::default();

        let outcome = Reporter::new(&config, &fonts, Duration::from_secs(1))
            .generate(&mut doc, &inv)
            .await
            .expect("report");

        assert_eq!(outcome.skipped_styles, vec![FontName::new("Papyrus", "Regular")]);
        assert_eq!(
            names(&doc, &outcome.container),
            vec!["Colors", "Typography", "Components"]
        );
        let colors = named(&doc, &outcome.container, "Colors");
        assert!(doc.find_one(&colors, |n| n.name == "#0080FF").is_some());
        let components = named(&doc, &outcome.container, "Components");
        assert!(doc
            .find_one(&components, |n| matches!(n.kind, NodeKind::Instance(_)))
            .is_some());
    }

    #[tokio::test]
    async fn mixed_size_style_renders_at_fallback_size() {
        let mut doc = document(vec![styled_text(
            "1:1",
            Mixed::Uniform(FontName::new("Inter", "Regular")),
            Mixed::Mixed,
            "Rich",
        )]);
        let inv = inventory(&doc);
        let fonts = catalog(&[]);
        let config = ReportConfig::default();

        let outcome = Reporter::new(&config, &fonts, Duration::from_secs(1))
            .generate(&mut doc, &inv)
            .await
            .expect("report");

        let item = named(&doc, &outcome.container, "Inter Regular mixed");
        let sample = doc.children(&item)[0].clone();
        match &doc.get(&sample).unwrap().kind {
            NodeKind::Text(props) => assert_eq!(props.font_size, Mixed::Uniform(16.0)),
            other => panic!("unexpected sample kind {other:?}"),
        }
    }

    #[tokio::test]
    async fn component_items_hold_an_instance_and_label() {
        let mut doc = document(vec![
            component("2:1", "Avatar", 48.0, vec![rect("2:2", 0.0, 0.0, 0.0)]),
            component("2:3", "Card", 320.0, vec![]),
        ]);
        let inv = inventory(&doc);
        let fonts = catalog(&[]);
        let config = ReportConfig::default();

        let outcome = Reporter::new(&config, &fonts, Duration::from_secs(1))
            .generate(&mut doc, &inv)
            .await
            .expect("report");

        let avatar = named(&doc, &outcome.container, "Avatar");
        let item = doc.get(&avatar).unwrap();
        assert_eq!(item.width, 100.0);
        let children = item.children.clone();
        match &doc.get(&children[0]).unwrap().kind {
            NodeKind::Instance(props) => assert_eq!(props.main_component, NodeId::new("2:1")),
            other => panic!("expected instance, got {other:?}"),
        }
        assert_eq!(doc.children(&children[0]).len(), 1);
        assert_eq!(characters(&doc, &children[1]), "Avatar");

        let card = named(&doc, &outcome.container, "Card");
        assert_eq!(doc.get(&card).unwrap().width, 320.0);
    }

    #[tokio::test]
    async fn empty_inventory_yields_bare_container() {
        let mut doc = document(vec![]);
        let inv = inventory(&doc);
        let fonts = catalog(&[]);
        let config = ReportConfig::default();

        let outcome = Reporter::new(&config, &fonts, Duration::from_secs(1))
            .generate(&mut doc, &inv)
            .await
            .expect("report");

        assert!(doc.children(&outcome.container).is_empty());
        assert_eq!(outcome.stats.colors + outcome.stats.text_styles + outcome.stats.components, 0);
    }

    #[tokio::test]
    async fn missing_label_font_aborts_the_run() {
        let mut doc = document(vec![rect("1:1", 1.0, 0.0, 0.0)]);
        let inv = inventory(&doc);
        let fonts = FontCatalog::new([FontName::new("Inter", "Regular")]);
        let config = ReportConfig::default();
        let original_page = doc.current_page().clone();

        let err = Reporter::new(&config, &fonts, Duration::from_secs(1))
            .generate(&mut doc, &inv)
            .await
            .expect_err("label font is missing");

        assert!(matches!(
            err,
            DsgError::Font(FontError::Unavailable(ref font)) if font == &FontName::new("Inter", "Bold")
        ));
        assert_eq!(doc.current_page(), &original_page);
        // The page and container created before the failure remain.
        assert_eq!(doc.pages().len(), 2);
    }
}
