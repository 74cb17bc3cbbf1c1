use crate::patterns;
use crate::step::parse_step;
use scout_common::scenario::{PageDefinition, ScenarioDocument, TestFlow, TestStep};

const PAGES_HEADING: &str = "페이지 정의";
const FLOWS_HEADING: &str = "테스트 플로우";
const ITEM_HEADING: &str = "### ";
const PATH_LABEL: &str = "- **경로**:";
const DESCRIPTION_LABEL: &str = "- **설명**:";
const PURPOSE_LABEL: &str = "**목적**:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Pages,
    Flows,
}

/// Accumulates entries while scanning; a page or flow is only committed when
/// the next one opens or the input ends.
#[derive(Default)]
struct Builder {
    pages: Vec<PageDefinition>,
    flows: Vec<TestFlow>,
    page: Option<PageDefinition>,
    flow: Option<TestFlow>,
    steps: Vec<TestStep>,
}

impl Builder {
    fn open_page(&mut self, name: &str) {
        self.flush_page();
        self.page = Some(PageDefinition {
            name: name.to_string(),
            ..Default::default()
        });
    }

    fn open_flow(&mut self, name: &str) {
        self.flush_flow();
        self.flow = Some(TestFlow {
            name: name.to_string(),
            ..Default::default()
        });
    }

    fn flush_page(&mut self) {
        if let Some(page) = self.page.take()
            && !page.name.is_empty()
        {
            self.pages.push(page);
        }
    }

    fn flush_flow(&mut self) {
        let steps = std::mem::take(&mut self.steps);
        if let Some(mut flow) = self.flow.take()
            && !flow.name.is_empty()
        {
            flow.steps = steps;
            self.flows.push(flow);
        }
    }

    fn finish(mut self) -> ScenarioDocument {
        self.flush_page();
        self.flush_flow();
        ScenarioDocument {
            pages: self.pages,
            flows: self.flows,
        }
    }

    fn page_line(&mut self, line: &str) {
        if let Some(name) = line.strip_prefix(ITEM_HEADING) {
            self.open_page(name.trim());
            return;
        }
        let Some(page) = self.page.as_mut() else {
            return;
        };
        if line.starts_with(PATH_LABEL) {
            page.path = patterns::attribute_value(line);
        } else if line.starts_with(DESCRIPTION_LABEL) {
            page.description = Some(patterns::attribute_value(line));
        }
    }

    fn flow_line(&mut self, line: &str) {
        if let Some(name) = line.strip_prefix(ITEM_HEADING) {
            self.open_flow(name.trim());
            return;
        }
        let Some(flow) = self.flow.as_mut() else {
            return;
        };
        if let Some(purpose) = line.strip_prefix(PURPOSE_LABEL) {
            flow.purpose = Some(purpose.trim().to_string());
        } else if let Some((order, raw)) = patterns::step_line(line) {
            self.steps.push(parse_step(order, raw));
        }
    }
}

fn section_heading(line: &str) -> Option<Section> {
    if heading_has_label(line, PAGES_HEADING) {
        Some(Section::Pages)
    } else if heading_has_label(line, FLOWS_HEADING) {
        Some(Section::Flows)
    } else {
        None
    }
}

/// True when some `## ` in the line is followed by `label`, allowing an emoji in between.
fn heading_has_label(line: &str, label: &str) -> bool {
    line.match_indices("## ").any(|(at, marker)| {
        line[at + marker.len()..]
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .starts_with(label)
    })
}

/// Parses scenario markdown into pages and flows.
///
/// Never fails: malformed or unknown lines are skipped and the document
/// simply comes out smaller. Use [`crate::validate`] to find out what is missing.
pub fn parse(content: &str) -> ScenarioDocument {
    let mut builder = Builder::default();
    let mut section = Section::None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(next) = section_heading(line) {
            section = next;
            continue;
        }

        match section {
            Section::Pages => builder.page_line(line),
            Section::Flows => builder.flow_line(line),
            Section::None => {}
        }
    }

    builder.finish()
}
