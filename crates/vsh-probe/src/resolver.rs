//! In-page locator resolution.
//!
//! CDP only offers `querySelectorAll`, so role, label, text and XPath
//! steps are resolved by a script evaluated in the page. The script takes
//! the JSON step list produced by [`Locator::to_json`], an operation name
//! and an argument object, and returns JSON.

use crate::locator::Locator;
use serde::Serialize;

/// Resolver script. Invoked as `(RESOLVER)(stepsJson, op, arg)`.
pub const RESOLVER: &str = r##"(stepsJson, op, arg) => {
  const steps = JSON.parse(stepsJson);
  const norm = (s) => (s || '').replace(/\s+/g, ' ').trim();
  const matches = (m, raw) => {
    const text = norm(raw);
    if (m.mode === 'contains') return text.toLowerCase().includes(norm(m.value).toLowerCase());
    if (m.mode === 'exact') return text === norm(m.value);
    try { return new RegExp(m.value, m.case_insensitive ? 'i' : '').test(text); } catch (e) { return false; }
  };
  const SKIP = ['SCRIPT', 'STYLE', 'HEAD', 'TITLE', 'NOSCRIPT', 'TEMPLATE'];
  const descendants = (root) => [...root.querySelectorAll('*')].filter((el) => !SKIP.includes(el.tagName));
  const rendered = (el) => el.getClientRects().length > 0 && getComputedStyle(el).visibility !== 'hidden' && !el.closest('[aria-hidden="true"]');
  const isVisible = (el) => {
    const style = getComputedStyle(el);
    if (style.visibility === 'hidden' || style.display === 'none') return false;
    const r = el.getBoundingClientRect();
    return r.width > 0 && r.height > 0;
  };
  const implicitRole = (el) => {
    const explicit = el.getAttribute('role');
    if (explicit) return explicit.split(/\s+/)[0];
    const tag = el.tagName.toLowerCase();
    const type = (el.getAttribute('type') || 'text').toLowerCase();
    switch (tag) {
      case 'button': return 'button';
      case 'a': return el.hasAttribute('href') ? 'link' : null;
      case 'h1': case 'h2': case 'h3': case 'h4': case 'h5': case 'h6': return 'heading';
      case 'select': return 'combobox';
      case 'option': return 'option';
      case 'textarea': return 'textbox';
      case 'img': return el.getAttribute('alt') === '' ? null : 'img';
      case 'dialog': return 'dialog';
      case 'input':
        if (['button', 'submit', 'reset', 'image'].includes(type)) return 'button';
        if (type === 'checkbox') return 'checkbox';
        if (['text', 'email', 'password', 'search', 'tel', 'url', 'number'].includes(type)) return 'textbox';
        return null;
      default: return null;
    }
  };
  const labelsOf = (el) => {
    const out = [];
    if (el.labels) for (const l of el.labels) out.push(l.textContent);
    return out;
  };
  const accessibleName = (el) => {
    const by = el.getAttribute('aria-labelledby');
    if (by) {
      return norm(by.split(/\s+/).map((id) => {
        const ref = document.getElementById(id);
        return ref ? ref.textContent : '';
      }).join(' '));
    }
    const aria = el.getAttribute('aria-label');
    if (aria) return norm(aria);
    const tag = el.tagName.toLowerCase();
    if (tag === 'input' || tag === 'textarea' || tag === 'select') {
      const labels = labelsOf(el);
      if (labels.length) return norm(labels.join(' '));
      const type = (el.getAttribute('type') || '').toLowerCase();
      if (['button', 'submit', 'reset'].includes(type)) return norm(el.value);
      return norm(el.getAttribute('placeholder') || el.getAttribute('title') || '');
    }
    if (tag === 'img') return norm(el.getAttribute('alt') || '');
    return norm(el.innerText || el.textContent || '') || norm(el.getAttribute('title') || '');
  };
  const smallestText = (root, m) => {
    const hits = descendants(root).filter((el) => matches(m, el.textContent));
    const set = new Set(hits);
    return hits.filter((el) => ![...el.children].some((c) => set.has(c)));
  };
  const xpathAll = (root, expr) => {
    const out = [];
    const res = document.evaluate(expr, root, null, XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null);
    for (let i = 0; i < res.snapshotLength; i++) {
      const node = res.snapshotItem(i);
      if (node.nodeType === Node.ELEMENT_NODE) out.push(node);
    }
    return out;
  };
  const byLabel = (root, m) => {
    const out = [];
    for (const label of root.querySelectorAll('label')) {
      if (matches(m, label.textContent) && label.control) out.push(label.control);
    }
    for (const el of root.querySelectorAll('[aria-label]')) {
      if (matches(m, el.getAttribute('aria-label'))) out.push(el);
    }
    return out;
  };
  const dedupe = (els) => {
    const seen = new Set();
    return els.filter((el) => (seen.has(el) ? false : (seen.add(el), true)));
  };
  const documentOrder = (a, b) => {
    if (a === b) return 0;
    return a.compareDocumentPosition(b) & Node.DOCUMENT_POSITION_FOLLOWING ? -1 : 1;
  };
  const apply = (roots, step) => {
    if (step.kind === 'nth') {
      const i = step.index < 0 ? roots.length + step.index : step.index;
      return roots[i] ? [roots[i]] : [];
    }
    if (step.kind === 'filter') return roots.filter((el) => matches(step.has_text, el.textContent));
    const out = [];
    for (const root of roots) {
      switch (step.kind) {
        case 'css': out.push(...root.querySelectorAll(step.css)); break;
        case 'has_text': out.push(...[...root.querySelectorAll(step.css)].filter((el) => matches(step.text, el.textContent))); break;
        case 'xpath': out.push(...xpathAll(root, step.xpath)); break;
        case 'text': out.push(...smallestText(root, step.text)); break;
        case 'role':
          out.push(...descendants(root).filter((el) => implicitRole(el) === step.role && rendered(el)
            && (!step.name || matches(step.name, accessibleName(el)))));
          break;
        case 'label': out.push(...byLabel(root, step.text)); break;
        case 'test_id': out.push(...[...root.querySelectorAll('[data-testid]')].filter((el) => el.getAttribute('data-testid') === step.id)); break;
        case 'placeholder': out.push(...[...root.querySelectorAll('[placeholder]')].filter((el) => matches(step.text, el.getAttribute('placeholder')))); break;
        default: throw new Error('unknown selector step ' + step.kind);
      }
    }
    return dedupe(out.sort(documentOrder));
  };
  const snapshot = (el) => {
    const r = el.getBoundingClientRect();
    const attributes = {};
    for (const a of el.attributes) attributes[a.name] = a.value;
    return {
      tag: el.tagName.toLowerCase(),
      visible: isVisible(el),
      enabled: !el.disabled && el.getAttribute('aria-disabled') !== 'true',
      editable: !el.disabled && !el.readOnly && (el.isContentEditable || ['INPUT', 'TEXTAREA', 'SELECT'].includes(el.tagName)),
      text: el.textContent || '',
      inner_text: el.innerText || '',
      value: typeof el.value === 'string' ? el.value : null,
      attributes,
      bbox: { x: r.x, y: r.y, width: r.width, height: r.height },
    };
  };
  const found = steps.reduce(apply, [document]);
  if (op === 'query') return found.map(snapshot);
  const el = found[arg.index];
  if (!el) return null;
  switch (op) {
    case 'point': {
      el.scrollIntoView({ block: 'center', inline: 'center' });
      const r = el.getBoundingClientRect();
      return { x: r.x + r.width / 2, y: r.y + r.height / 2 };
    }
    case 'focus':
      el.focus();
      return true;
    case 'fill': {
      el.focus();
      const proto = el instanceof HTMLTextAreaElement ? HTMLTextAreaElement.prototype : HTMLInputElement.prototype;
      const setter = Object.getOwnPropertyDescriptor(proto, 'value').set;
      setter.call(el, arg.value);
      el.dispatchEvent(new Event('input', { bubbles: true }));
      el.dispatchEvent(new Event('change', { bubbles: true }));
      return true;
    }
    default:
      throw new Error('unknown resolver op ' + op);
  }
}"##;

/// Operation performed on the resolved elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverOp {
    /// Snapshot every match
    Query,
    /// Scroll match into view and return its centre point
    Point,
    /// Focus match
    Focus,
    /// Replace the value of an input or textarea
    Fill,
}

impl ResolverOp {
    /// Name understood by the script
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Point => "point",
            Self::Focus => "focus",
            Self::Fill => "fill",
        }
    }
}

/// Argument object passed to the resolver
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolverArg {
    /// Index of the targeted match
    pub index: usize,
    /// Value for [`ResolverOp::Fill`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ResolverArg {
    /// Target match `index`
    #[must_use]
    pub const fn at(index: usize) -> Self {
        Self { index, value: None }
    }

    /// Attach a fill value
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Build the expression evaluating `op` on `locator`
///
/// # Errors
///
/// Returns error if the locator or argument fail to serialize
pub fn invocation(
    locator: &Locator,
    op: ResolverOp,
    arg: &ResolverArg,
) -> serde_json::Result<String> {
    let steps = serde_json::to_string(&locator.to_json()?)?;
    let op = serde_json::to_string(op.as_str())?;
    let arg = serde_json::to_string(arg)?;
    Ok(format!("({RESOLVER})({steps}, {op}, {arg})"))
}
