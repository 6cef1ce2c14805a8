//! Headless tab bar with two drill-down stacks: a fading header and a sliding
//! content area, both mounted inside the first tab.

use viewkit::{
    Document, NodeId, Size, StackEvent, StackTransitionsSpec, View, ViewHandle, ViewKitResult,
    ViewSelector, ViewStack,
};

struct TemplateView {
    root: NodeId,
    title: &'static str,
}

impl TemplateView {
    fn handle(doc: &mut Document, tag: &str, title: &'static str) -> ViewHandle {
        let root = doc.create_element(tag);
        ViewHandle::new(Self { root, title })
    }
}

impl View for TemplateView {
    fn root(&self) -> NodeId {
        self.root
    }

    fn render(&mut self, doc: &mut Document) -> ViewKitResult<()> {
        doc.set_text(self.root, self.title)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut doc = Document::new(Size::new(375.0, 667.0));
    let body = doc.root();
    let tabs = doc.create_element("tabs");
    doc.append_child(body, tabs)?;

    // The first tab hosts both stacks.
    let container = doc.create_element("container");
    let header = doc.create_element("header");
    let content = doc.create_element("content");
    doc.append_child(container, header)?;
    doc.append_child(container, content)?;
    let container = ViewHandle::new(TemplateView {
        root: container,
        title: "container",
    });

    let header_transitions = StackTransitionsSpec::from_json(
        r#"{ "push": { "kind": "fade" }, "pop": { "kind": "fade", "reverse": true } }"#,
    )?
    .resolve()?;
    let content_transitions = StackTransitionsSpec::from_json(
        r#"{ "push": { "kind": "slide" }, "pop": { "kind": "slide", "reverse": true } }"#,
    )?
    .resolve()?;
    let mut header_stack = ViewStack::with_transitions(header, header_transitions);
    let mut content_stack = ViewStack::with_transitions(content, content_transitions);
    content_stack.on(|ev| {
        if let StackEvent::Pushed(view) | StackEvent::Popped(Some(view)) = ev {
            println!("content stack: {ev:?} ({})", view.id());
        }
    });

    let foo_header = TemplateView::handle(&mut doc, "h1", "Foo");
    let foo = TemplateView::handle(&mut doc, "page", "Foo page");
    header_stack.push_view(&mut doc, foo_header, None)?;
    content_stack.push_view(&mut doc, foo, None)?;

    let qux = TemplateView::handle(&mut doc, "page", "Qux");
    let mut selector = ViewSelector::with_views(tabs, vec![container, qux]);
    selector.select_view(&mut doc, 0, None)?;
    println!("{}", doc.outline(body)?);

    for (title, page) in [("Bar", "Bar page"), ("Baz", "Baz page")] {
        let h = TemplateView::handle(&mut doc, "h1", title);
        let p = TemplateView::handle(&mut doc, "page", page);
        header_stack.push_view(&mut doc, h, None)?;
        content_stack.push_view(&mut doc, p, None)?;
        println!("mid-transition:\n{}", doc.outline(body)?);
        let elapsed = doc.settle()?;
        println!("settled after {elapsed:.2}s:\n{}", doc.outline(body)?);
    }

    header_stack.pop_view(&mut doc, None)?;
    content_stack.pop_view(&mut doc, None)?;
    doc.settle()?;
    println!("after pop:\n{}", doc.outline(body)?);

    selector.select_view(&mut doc, 1, None)?;
    println!("qux tab:\n{}", doc.outline(body)?);
    selector.select_view(&mut doc, 0, None)?;
    println!("back to the container:\n{}", doc.outline(body)?);

    Ok(())
}
