//! Embedded HTML/CSS/JS frontend for the spamscope web dashboard.
//!
//! The entire SPA is compiled into the binary as a string constant.
//! No external assets, no build tools, no CDN dependencies. Charts are drawn
//! as inline SVG from the JSON API.

/// The complete single-page dashboard HTML.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Spam Detector</title>
<style>
:root {
  --bg: #f8f9fa;
  --surface: #ffffff;
  --border: #dee2e6;
  --text: #212529;
  --text-muted: #6c757d;
  --accent: #2c5aa0;
  --accent-dark: #1e3a6f;
  --ham: #51cf66;
  --spam: #ff6b6b;
  --radius: 12px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}

/* Layout */
.app { display: flex; min-height: 100vh; }

aside {
  width: 260px;
  background: var(--surface);
  border-right: 1px solid var(--border);
  padding: 24px;
  flex-shrink: 0;
}

aside h1 { color: var(--accent-dark); font-size: 20px; margin-bottom: 16px; }
aside h3 { color: var(--accent); font-size: 14px; margin: 18px 0 8px; }
aside .metric { margin-bottom: 10px; }
aside .metric .label { color: var(--text-muted); font-size: 12px; }
aside .metric .value { font-size: 22px; font-weight: 700; color: var(--accent-dark); }
aside .about { color: var(--text-muted); font-size: 12px; }

nav button {
  display: block;
  width: 100%;
  text-align: left;
  padding: 8px 12px;
  margin-bottom: 4px;
  border: none;
  border-radius: 8px;
  background: transparent;
  color: var(--text);
  font-size: 14px;
  cursor: pointer;
}
nav button.active { background: var(--accent); color: white; }

main { flex: 1; padding: 32px; max-width: 1200px; }
main h2 { color: var(--accent-dark); margin-bottom: 8px; }
main h3 { color: var(--accent); margin: 20px 0 10px; }
.subtitle { color: var(--text-muted); margin-bottom: 20px; }

.columns { display: grid; grid-template-columns: 2fr 1fr; gap: 24px; }
.grid-2 { display: grid; grid-template-columns: 1fr 1fr; gap: 16px; }
.grid-3 { display: grid; grid-template-columns: repeat(3, 1fr); gap: 16px; }
.grid-4 { display: grid; grid-template-columns: repeat(4, 1fr); gap: 16px; }

.card {
  background: var(--surface);
  padding: 20px;
  border-radius: var(--radius);
  box-shadow: 0 2px 8px rgba(0,0,0,0.1);
  border-left: 4px solid var(--accent);
}
.card h4 { color: var(--text-muted); font-weight: 500; margin-bottom: 6px; }
.card .big { font-size: 26px; font-weight: 700; color: var(--accent); }
.card p { color: var(--text-muted); font-size: 13px; margin-top: 8px; }

textarea {
  width: 100%;
  height: 180px;
  padding: 12px;
  border: 2px solid var(--border);
  border-radius: 8px;
  font-family: var(--font);
  font-size: 14px;
  resize: vertical;
}
textarea:focus { outline: none; border-color: var(--accent); }

.btn {
  background: var(--accent);
  color: white;
  font-weight: 600;
  border: none;
  border-radius: 8px;
  padding: 8px 24px;
  cursor: pointer;
}
.btn:hover { background: var(--accent-dark); }
.btn.secondary { background: var(--text-muted); }
.btn-row { display: flex; gap: 10px; margin: 12px 0; }

.result-box {
  padding: 20px;
  border-radius: var(--radius);
  color: white;
  text-align: center;
  margin-top: 16px;
}
.result-box.spam { background: linear-gradient(135deg, #ff6b6b 0%, #ee5a6f 100%); }
.result-box.ham { background: linear-gradient(135deg, #51cf66 0%, #37b24d 100%); }

.banner { padding: 14px; border-radius: 8px; margin-bottom: 16px; }
.banner.error { background: #f8d7da; border-left: 4px solid #dc3545; }
.banner.warn { background: #fff3cd; border-left: 4px solid #ffc107; }
.banner.info { background: #d1ecf1; border-left: 4px solid #17a2b8; }

.history-item {
  background: var(--surface);
  padding: 12px;
  border-radius: 8px;
  margin-bottom: 10px;
  box-shadow: 0 2px 4px rgba(0,0,0,0.1);
  border-left: 4px solid var(--ham);
}
.history-item.spam { border-left-color: var(--spam); }
.history-item .head { display: flex; justify-content: space-between; font-weight: 600; }
.history-item .msg { font-size: 12px; color: var(--text-muted); margin-top: 4px; word-break: break-word; }
.history-item .ts { font-size: 10px; color: #adb5bd; margin-top: 4px; }

.tabs { display: flex; gap: 4px; margin-bottom: 12px; }
.tabs button { border: 1px solid var(--border); background: var(--surface); padding: 6px 14px; border-radius: 8px; cursor: pointer; }
.tabs button.active { border-color: var(--accent); color: var(--accent); font-weight: 600; }

.sample { background: var(--surface); padding: 14px; border-radius: 8px; margin-bottom: 10px; border-left: 4px solid var(--ham); box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
.sample.spam { border-left-color: var(--spam); }
.sample strong { color: var(--ham); }
.sample.spam strong { color: var(--spam); }

.hidden { display: none; }
footer { text-align: center; color: var(--text-muted); padding: 24px; font-size: 12px; }
svg text { font-family: var(--font); }
</style>
</head>
<body>
<div class="app">
  <aside>
    <h1>📧 Spam Detector</h1>
    <div id="model-info"></div>
    <h3>Navigation</h3>
    <nav>
      <button id="nav-classify" class="active" onclick="showView('classify')">🔍 Classify Message</button>
      <button id="nav-dashboard" onclick="showView('dashboard')">📈 Dashboard</button>
    </nav>
    <h3>About</h3>
    <p class="about">This app uses a Naive Bayes classifier to detect spam messages.</p>
  </aside>

  <main>
    <div id="model-error" class="banner error hidden"></div>

    <!-- Classify view -->
    <section id="view-classify">
      <h2>🔍 Spam Message Classifier</h2>
      <p class="subtitle">Enter a message below to check if it's spam or legitimate (ham).</p>
      <div class="columns">
        <div>
          <h3>📝 Enter Message</h3>
          <textarea id="message" placeholder="Enter the message you want to classify..."></textarea>
          <div class="btn-row">
            <button class="btn" id="classify-btn" onclick="classify()">🔍 Classify</button>
            <button class="btn secondary" onclick="clearInput()">🗑️ Clear</button>
          </div>
          <h3>💡 Try These Examples</h3>
          <div class="btn-row">
            <button class="btn secondary" onclick="useExample('ham')">📧 Legitimate Example</button>
            <button class="btn secondary" onclick="useExample('spam')">⚠️ Spam Example</button>
          </div>
          <div id="notice" class="banner info hidden"></div>
          <div id="result"></div>
        </div>
        <div>
          <h3>📜 Recent Predictions</h3>
          <div id="history"></div>
        </div>
      </div>
    </section>

    <!-- Dashboard view -->
    <section id="view-dashboard" class="hidden">
      <h2>📈 Model Statistics Dashboard</h2>
      <div id="dashboard"></div>
    </section>

    <footer>Powered by a Multinomial Naive Bayes classifier</footer>
  </main>
</div>

<script>
let examples = { ham: '', spam: '' };
let modelReady = false;

function esc(s) {
  return String(s)
    .replace(/&/g, '&amp;').replace(/</g, '&lt;').replace(/>/g, '&gt;')
    .replace(/"/g, '&quot;').replace(/'/g, '&#39;');
}

function fmt(n) { return Number(n).toLocaleString('en-US'); }

async function api(method, path, body) {
  const opts = { method, headers: {} };
  if (body !== undefined) {
    opts.headers['Content-Type'] = 'application/json';
    opts.body = JSON.stringify(body);
  }
  const res = await fetch(path, opts);
  const data = await res.json();
  return { ok: res.ok, status: res.status, data };
}

function showView(name) {
  for (const v of ['classify', 'dashboard']) {
    document.getElementById('view-' + v).classList.toggle('hidden', v !== name);
    document.getElementById('nav-' + v).classList.toggle('active', v === name);
  }
  if (name === 'dashboard') loadDashboard();
}

// ---------------------------------------------------------------- model info

async function loadModel() {
  const { ok, data } = await api('GET', '/api/model');
  const info = document.getElementById('model-info');
  const banner = document.getElementById('model-error');
  modelReady = ok;
  if (!ok) {
    banner.textContent = '❌ ' + data.error;
    banner.classList.remove('hidden');
    document.getElementById('classify-btn').disabled = true;
    info.innerHTML = '';
    return;
  }
  info.innerHTML =
    '<h3>🎯 Model Info</h3>' +
    '<div class="metric"><div class="label">Accuracy</div><div class="value">' + (data.accuracy * 100).toFixed(2) + '%</div></div>' +
    '<div class="metric"><div class="label">Features</div><div class="value">' + fmt(data.feature_count) + '</div></div>';
}

// ---------------------------------------------------------------- classify

async function loadExamples() {
  const { data } = await api('GET', '/api/examples');
  examples = data;
}

function useExample(kind) {
  document.getElementById('message').value = examples[kind];
}

function clearInput() {
  document.getElementById('message').value = '';
  document.getElementById('result').innerHTML = '';
  document.getElementById('notice').classList.add('hidden');
}

async function classify() {
  if (!modelReady) return;
  const message = document.getElementById('message').value;
  const { ok, data } = await api('POST', '/api/classify', { message });
  const notice = document.getElementById('notice');
  const result = document.getElementById('result');
  notice.classList.add('hidden');

  if (!ok) {
    result.innerHTML = '<div class="banner error">' + esc(data.error) + '</div>';
    return;
  }
  if (!data.result) {
    notice.textContent = data.notice;
    notice.classList.remove('hidden');
    result.innerHTML = '';
    return;
  }

  const c = data.classification;
  const spam = c.label === 'Spam';
  const hamPct = c.ham_probability * 100;
  const spamPct = c.spam_probability * 100;
  result.innerHTML =
    '<h3>🎯 Classification Result</h3>' +
    (spam
      ? '<div class="result-box spam"><h2>⚠️ SPAM DETECTED</h2><p>This message appears to be spam!</p></div>'
      : '<div class="result-box ham"><h2>✅ LEGITIMATE MESSAGE</h2><p>This message appears to be legitimate.</p></div>') +
    '<h3>📊 Confidence Scores</h3>' +
    '<div class="grid-2">' +
    '<div class="card"><h4 style="color: var(--ham)">🟢 Legitimate (Ham)</h4><div class="big">' + hamPct.toFixed(2) + '%</div></div>' +
    '<div class="card"><h4 style="color: var(--spam)">🔴 Spam</h4><div class="big">' + spamPct.toFixed(2) + '%</div></div>' +
    '</div>' +
    '<div style="text-align:center; margin-top: 16px">' + gauge(spamPct) + '</div>';

  loadHistory();
}

async function loadHistory() {
  const { data } = await api('GET', '/api/history');
  const el = document.getElementById('history');
  if (!data.entries.length) {
    el.innerHTML = '<div class="banner info">No predictions yet. Classify a message to see history!</div>';
    return;
  }
  el.innerHTML = data.entries.map(e => {
    const spam = e.label === 'Spam';
    const color = spam ? 'var(--spam)' : 'var(--ham)';
    return '<div class="history-item' + (spam ? ' spam' : '') + '">' +
      '<div class="head"><span style="color:' + color + '">' + (spam ? '⚠️ ' : '✅ ') + e.label + '</span>' +
      '<span style="font-size:12px; color: var(--text-muted)">' + e.confidence.toFixed(1) + '%</span></div>' +
      '<div class="msg">' + esc(e.message) + '</div>' +
      '<div class="ts">' + esc(e.timestamp) + '</div></div>';
  }).join('') +
    '<button class="btn secondary" style="width:100%" onclick="clearHistory()">🗑️ Clear History</button>';
}

async function clearHistory() {
  await api('DELETE', '/api/history');
  loadHistory();
}

// ---------------------------------------------------------------- charts

function polar(cx, cy, r, deg) {
  const rad = (deg - 180) * Math.PI / 180;
  return [cx + r * Math.cos(rad), cy + r * Math.sin(rad)];
}

function arc(cx, cy, r, from, to) {
  const [x1, y1] = polar(cx, cy, r, from);
  const [x2, y2] = polar(cx, cy, r, to);
  const large = to - from > 180 ? 1 : 0;
  return 'M' + x1 + ' ' + y1 + ' A' + r + ' ' + r + ' 0 ' + large + ' 1 ' + x2 + ' ' + y2;
}

// Semicircle gauge of spam probability with 0-30-70-100 bands and a 50 threshold.
function gauge(pct) {
  const cx = 160, cy = 150, r = 110;
  const deg = v => v * 1.8;
  const band = (a, b, color) =>
    '<path d="' + arc(cx, cy, r, deg(a), deg(b)) + '" stroke="' + color + '" stroke-width="34" fill="none"/>';
  const [tx1, ty1] = polar(cx, cy, r - 20, deg(50));
  const [tx2, ty2] = polar(cx, cy, r + 20, deg(50));
  return '<svg width="320" height="190" viewBox="0 0 320 190">' +
    '<text x="160" y="22" text-anchor="middle" font-size="18" fill="#2c5aa0">Spam Probability</text>' +
    band(0, 30, '#d4edda') + band(30, 70, '#fff3cd') + band(70, 100, '#f8d7da') +
    (pct > 0 ? '<path d="' + arc(cx, cy, r, 0, deg(Math.min(pct, 99.999))) + '" stroke="#2c5aa0" stroke-width="12" fill="none"/>' : '') +
    '<line x1="' + tx1 + '" y1="' + ty1 + '" x2="' + tx2 + '" y2="' + ty2 + '" stroke="red" stroke-width="4"/>' +
    '<text x="160" y="150" text-anchor="middle" font-size="32" font-weight="700" fill="#2c5aa0">' + pct.toFixed(1) + '</text>' +
    '</svg>';
}

function donut(ham, spam) {
  const total = ham + spam;
  if (!total) return '';
  const cx = 150, cy = 150, r = 100;
  const hamDeg = ham / total * 360;
  const slice = (from, to, color) => {
    if (to - from >= 360) return '<circle cx="' + cx + '" cy="' + cy + '" r="' + r + '" stroke="' + color + '" stroke-width="60" fill="none"/>';
    const [x1, y1] = polar(cx, cy, r, from + 90);
    const [x2, y2] = polar(cx, cy, r, to + 90);
    const large = to - from > 180 ? 1 : 0;
    return '<path d="M' + x1 + ' ' + y1 + ' A' + r + ' ' + r + ' 0 ' + large + ' 1 ' + x2 + ' ' + y2 + '" stroke="' + color + '" stroke-width="60" fill="none"/>';
  };
  return '<svg width="300" height="340" viewBox="0 0 300 340">' +
    (ham ? slice(0, hamDeg, '#51cf66') : '') +
    (spam ? slice(hamDeg, 360, '#ff6b6b') : '') +
    '<text x="150" y="300" text-anchor="middle" font-size="13" fill="#51cf66">■ Legitimate (Ham) ' + (ham / total * 100).toFixed(1) + '%</text>' +
    '<text x="150" y="322" text-anchor="middle" font-size="13" fill="#ff6b6b">■ Spam ' + (spam / total * 100).toFixed(1) + '%</text>' +
    '</svg>';
}

function histogram(hist) {
  const bins = hist.bins;
  if (!bins.length) return '';
  const w = 520, h = 300, left = 44, bottom = 40, top = 10;
  const peak = Math.max(1, ...bins.map(b => Math.max(b.ham, b.spam)));
  const bw = (w - left - 10) / bins.length;
  const y = v => top + (h - top - bottom) * (1 - v / peak);
  let bars = '';
  bins.forEach((b, i) => {
    const x = left + i * bw;
    bars += '<rect x="' + x + '" y="' + y(b.ham) + '" width="' + (bw - 1) + '" height="' + (h - bottom - y(b.ham)) + '" fill="#51cf66" opacity="0.7"><title>Ham ' + b.start + '-' + (b.end - 1) + ': ' + b.ham + '</title></rect>';
    bars += '<rect x="' + x + '" y="' + y(b.spam) + '" width="' + (bw - 1) + '" height="' + (h - bottom - y(b.spam)) + '" fill="#ff6b6b" opacity="0.7"><title>Spam ' + b.start + '-' + (b.end - 1) + ': ' + b.spam + '</title></rect>';
  });
  const last = bins[bins.length - 1];
  return '<svg width="100%" viewBox="0 0 ' + w + ' ' + h + '">' +
    '<line x1="' + left + '" y1="' + (h - bottom) + '" x2="' + (w - 10) + '" y2="' + (h - bottom) + '" stroke="#adb5bd"/>' +
    bars +
    '<text x="' + left + '" y="' + (h - bottom + 16) + '" font-size="11" fill="#6c757d">' + bins[0].start + '</text>' +
    '<text x="' + (w - 10) + '" y="' + (h - bottom + 16) + '" font-size="11" text-anchor="end" fill="#6c757d">' + (last.end - 1) + '</text>' +
    '<text x="' + (w / 2) + '" y="' + (h - 6) + '" font-size="12" text-anchor="middle" fill="#6c757d">Message Length (characters)</text>' +
    '<text x="' + (left - 6) + '" y="' + (top + 10) + '" font-size="11" text-anchor="end" fill="#6c757d">' + peak + '</text>' +
    '</svg>';
}

// ---------------------------------------------------------------- dashboard

function metric(title, value, color) {
  return '<div class="card"><h4>' + title + '</h4><div class="big" style="color:' + color + '">' + value + '</div></div>';
}

function samples(list, kind) {
  return list.map((m, i) =>
    '<div class="sample' + (kind === 'spam' ? ' spam' : '') + '"><strong>Example ' + (i + 1) + ':</strong><p>' + esc(m) + '</p></div>'
  ).join('');
}

function showSampleTab(kind) {
  for (const k of ['ham', 'spam']) {
    document.getElementById('samples-' + k).classList.toggle('hidden', k !== kind);
    document.getElementById('tab-' + k).classList.toggle('active', k === kind);
  }
}

async function loadDashboard() {
  const { data } = await api('GET', '/api/dashboard');
  const el = document.getElementById('dashboard');
  if (!data.available) {
    el.innerHTML = '<div class="banner warn">⚠️ ' + esc(data.warning) + '</div>' +
      '<div class="banner info">To view full dashboard statistics, make sure the dataset file is configured and readable.</div>';
    return;
  }
  const s = data.stats;
  let html =
    '<h3>📊 Dataset Overview</h3>' +
    '<div class="grid-4">' +
    metric('Total Messages', fmt(s.total), '#2c5aa0') +
    metric('Spam Messages', fmt(s.spam_count), '#ff6b6b') +
    metric('Ham Messages', fmt(s.ham_count), '#51cf66') +
    metric('Spam Rate', data.spam_rate_display, '#2c5aa0') +
    '</div>' +
    '<div class="grid-2" style="margin-top: 20px">' +
    '<div class="card"><h3>🥧 Distribution of Messages</h3>' + donut(s.ham_count, s.spam_count) + '</div>' +
    '<div class="card"><h3>📏 Message Length Analysis</h3>' + histogram(s.histogram) + '</div>' +
    '</div>';

  if (data.model) {
    html += '<h3>🎯 Model Performance</h3><div class="grid-3">' +
      '<div class="card"><h4>Model Accuracy</h4><div class="big">' + (data.model.accuracy * 100).toFixed(2) + '%</div><p>Percentage of correctly classified messages</p></div>' +
      '<div class="card"><h4>Feature Count</h4><div class="big">' + fmt(data.model.feature_count) + '</div><p>Unique words in vocabulary</p></div>' +
      '<div class="card"><h4>Algorithm</h4><div class="big" style="font-size: 20px">Naive Bayes</div><p>Multinomial variant</p></div>' +
      '</div>';
  }

  html += '<h3>📝 Sample Messages from Dataset</h3>' +
    '<div class="tabs"><button id="tab-ham" class="active" onclick="showSampleTab(\'ham\')">✅ Ham Examples</button>' +
    '<button id="tab-spam" onclick="showSampleTab(\'spam\')">⚠️ Spam Examples</button></div>' +
    '<div id="samples-ham">' + samples(s.samples.ham, 'ham') + '</div>' +
    '<div id="samples-spam" class="hidden">' + samples(s.samples.spam, 'spam') + '</div>';

  el.innerHTML = html;
}

loadModel();
loadExamples();
loadHistory();
</script>
</body>
</html>
"##;
