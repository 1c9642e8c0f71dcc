//! Static stylesheet shared by every rendered widget.
//!
//! Declared once and embedded by the host -- cable flow animation is
//! parameterized per element through CSS custom properties
//! (`--flow-duration`, `--flow-direction`, `--flow-offset`) instead of
//! injecting generated keyframes into the page at runtime.

/// CSS the host embeds once per document.
pub fn stylesheet() -> &'static str {
    "\
.vg-anim {
  transition: all 0.5s ease-out;
}
.vg-flow {
  animation: vg-cable-flow var(--flow-duration, 1s) linear infinite;
  animation-direction: var(--flow-direction, normal);
}
@keyframes vg-cable-flow {
  to {
    stroke-dashoffset: var(--flow-offset, -18);
  }
}
.vg-hit {
  stroke: transparent;
  fill: none;
  pointer-events: stroke;
  cursor: pointer;
}
.vg-handle {
  cursor: grab;
}
"
}
