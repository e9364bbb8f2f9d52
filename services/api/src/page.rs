//! The single-page browser UI.
//!
//! Plain HTML and script with no build step. Everything it shows comes from
//! the JSON API: form choices from `/api/options`, lessons from
//! `/api/lessons`, and answer feedback from `/api/lessons/{id}/answers`.

pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>One Call GenAI Lesson Lab</title>
<style>
  :root { --accent: #6d28d9; --ok: #15803d; --warn: #b45309; --err: #b91c1c; --muted: #6b7280; }
  * { box-sizing: border-box; }
  body { font-family: system-ui, sans-serif; margin: 0; color: #111827; background: #fafafa; }
  header { padding: 1.25rem 2rem; border-bottom: 1px solid #e5e7eb; background: #fff; }
  header h1 { margin: 0; font-size: 1.5rem; }
  header p { margin: .25rem 0 0; color: var(--muted); }
  main { display: grid; grid-template-columns: 300px 1fr; gap: 2rem; padding: 1.5rem 2rem; }
  aside, section.card { background: #fff; border: 1px solid #e5e7eb; border-radius: 8px; padding: 1rem 1.25rem; }
  label { display: block; margin: .75rem 0 .25rem; font-weight: 600; font-size: .9rem; }
  input[type=text], select { width: 100%; padding: .45rem; border: 1px solid #d1d5db; border-radius: 6px; }
  input[type=range] { width: 100%; }
  .inline { display: flex; align-items: center; gap: .5rem; font-weight: 400; }
  button.primary { margin-top: 1rem; width: 100%; padding: .6rem; border: 0; border-radius: 6px; background: var(--accent); color: #fff; font-weight: 600; cursor: pointer; }
  button.primary:disabled { background: #c4b5fd; cursor: not-allowed; }
  .columns { display: grid; grid-template-columns: 1.25fr 1fr; gap: 1.5rem; }
  iframe.diagram { width: 100%; height: 360px; border: 1px solid #e5e7eb; border-radius: 6px; background: #fff; }
  .question { border-top: 1px solid #e5e7eb; padding: .75rem 0; }
  .question button.option { display: block; width: 100%; text-align: left; margin: .25rem 0; padding: .4rem .6rem; border: 1px solid #d1d5db; border-radius: 6px; background: #fff; cursor: pointer; }
  .question button.option:disabled { cursor: default; }
  .question button.option.selected { border-color: var(--accent); background: #ede9fe; }
  .verdict.ok { color: var(--ok); font-weight: 600; }
  .verdict.warn { color: var(--warn); font-weight: 600; }
  .caption { color: var(--muted); font-size: .9rem; }
  .score { margin-top: 1rem; padding: .6rem .8rem; background: #eff6ff; border-radius: 6px; }
  .error { padding: .75rem 1rem; border-radius: 6px; background: #fef2f2; color: var(--err); }
  pre { white-space: pre-wrap; word-break: break-word; background: #f3f4f6; padding: .75rem; border-radius: 6px; }
  .hidden { display: none; }
</style>
</head>
<body>
<header>
  <h1>One Call GenAI Lesson Lab</h1>
  <p>Type a topic &rarr; get a mini-lesson + diagram + quiz from a single model call.</p>
</header>
<main>
  <aside>
    <form id="lesson-form">
      <label for="topic">Topic</label>
      <input id="topic" type="text" placeholder="e.g., Transformers, Kubernetes, Gradient Descent, SQL Joins" autocomplete="off">

      <label for="audience">Audience</label>
      <select id="audience"></select>

      <label for="style">Style</label>
      <select id="style"></select>

      <label class="inline"><input id="include-demo" type="checkbox" checked> Include a tiny example/demo in the lesson</label>

      <label for="model">Model</label>
      <input id="model" type="text">

      <label for="temperature">Creativity (temperature): <span id="temperature-value"></span></label>
      <input id="temperature" type="range">

      <label for="max-tokens">Max output tokens: <span id="max-tokens-value"></span></label>
      <input id="max-tokens" type="range">

      <button id="generate" class="primary" type="submit" disabled>Generate (one API call)</button>
    </form>
  </aside>

  <div id="output">
    <section class="card" id="intro">
      <h3>What you'll get</h3>
      <ul>
        <li><strong>Mini-lesson</strong> (markdown)</li>
        <li><strong>Mermaid diagram</strong> (auto-rendered)</li>
        <li><strong>5-question quiz</strong> (interactive)</li>
        <li><strong>Next steps</strong> (3 items)</li>
      </ul>
      <p class="caption">Try: Topic <em>Backpropagation</em>, Audience <em>Bootcamp</em>, Style <em>Fun &amp; analogy-driven</em>.</p>
    </section>
    <p id="status" class="caption hidden">Thinking...</p>
    <div id="error" class="hidden"></div>
    <div id="lesson" class="hidden"></div>
  </div>
</main>
<script>
  const $ = (id) => document.getElementById(id);

  function escapeHtml(str) {
    return String(str ?? '')
      .replace(/&/g, '&amp;')
      .replace(/</g, '&lt;')
      .replace(/>/g, '&gt;')
      .replace(/"/g, '&quot;')
      .replace(/'/g, '&#39;');
  }

  function fillSelect(select, choices) {
    select.innerHTML = choices
      .map((c) => `<option value="${escapeHtml(c.value)}">${escapeHtml(c.label)}</option>`)
      .join('');
  }

  function bindRange(input, range, output, format) {
    input.min = range.min;
    input.max = range.max;
    input.step = range.step;
    input.value = range.default;
    const show = () => { output.textContent = format(Number(input.value)); };
    input.addEventListener('input', show);
    show();
  }

  function setBusy(busy) {
    $('status').classList.toggle('hidden', !busy);
    $('generate').disabled = busy || !$('topic').value.trim();
  }

  function showError(body) {
    const raw = body.raw_output
      ? `<details><summary>Raw model output</summary><pre>${escapeHtml(body.raw_output)}</pre></details>`
      : '';
    $('error').innerHTML = `<p class="error">${escapeHtml(body.message)}</p>${raw}`;
    $('error').classList.remove('hidden');
  }

  function scoreLine(score) {
    return `Score: ${score.correct}/${score.total} (answered ${score.answered}/${score.total})`;
  }

  function renderQuestion(lessonId, q) {
    const answered = q.selected !== null && q.selected !== undefined;
    const options = q.options
      .map((text, i) => {
        const selected = answered && q.selected === i ? ' selected' : '';
        const disabled = answered ? ' disabled' : '';
        return `<button class="option${selected}" data-lesson="${lessonId}" data-question="${q.index}" data-option="${i}"${disabled}>${escapeHtml(text)}</button>`;
      })
      .join('');
    let feedback = '';
    if (q.feedback) {
      const cls = q.feedback.correct ? 'ok' : 'warn';
      feedback = `<p class="verdict ${cls}">${escapeHtml(q.feedback.message)}</p>`;
      if (q.feedback.explanation) {
        feedback += `<p class="caption">${escapeHtml(q.feedback.explanation)}</p>`;
      }
    }
    return `<div class="question" id="question-${q.index}">
      <p><strong>Q${q.index + 1}. ${escapeHtml(q.question)}</strong></p>
      ${options}${feedback}
    </div>`;
  }

  function showJson(json) {
    $('json-panel').innerHTML = json
      ? `<details><summary>Show the exact JSON the model produced</summary><pre>${escapeHtml(json)}</pre></details>`
      : '<p class="caption">The exact JSON the model produced is shown once every question is answered.</p>';
  }

  function renderLesson(lesson) {
    const steps = lesson.next_steps.map((s) => `<li>${escapeHtml(s)}</li>`).join('');
    const quiz = lesson.quiz.map((q) => renderQuestion(lesson.id, q)).join('');
    $('lesson').innerHTML = `
      <section class="card">
        <h2>${escapeHtml(lesson.title)}</h2>
        <p>${escapeHtml(lesson.elevator_pitch)}</p>
        <div class="columns">
          <div>
            <h3>Mini-lesson</h3>
            <div>${lesson.lesson_html}</div>
            <h3>Next steps</h3>
            <ol>${steps}</ol>
          </div>
          <div>
            <h3>Diagram</h3>
            <iframe class="diagram" sandbox="allow-scripts" title="Diagram"></iframe>
          </div>
        </div>
      </section>
      <section class="card">
        <h3>Quiz</h3>
        <div id="quiz">${quiz}</div>
        <p class="score" id="score">${scoreLine(lesson.score)}</p>
      </section>
      <section class="card" id="json-panel"></section>`;
    $('lesson').querySelector('iframe.diagram').srcdoc = lesson.diagram_document;
    showJson(lesson.extracted_json);
    $('lesson').classList.remove('hidden');
  }

  async function generate(event) {
    event.preventDefault();
    const topic = $('topic').value.trim();
    if (!topic) return;
    $('intro').classList.add('hidden');
    $('error').classList.add('hidden');
    $('lesson').classList.add('hidden');
    setBusy(true);
    try {
      const response = await fetch('/api/lessons', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({
          topic,
          audience: $('audience').value,
          style: $('style').value,
          include_demo: $('include-demo').checked,
          model: $('model').value.trim() || null,
          temperature: Number($('temperature').value),
          max_output_tokens: Number($('max-tokens').value),
        }),
      });
      const body = await response.json();
      if (!response.ok) {
        showError(body);
        return;
      }
      renderLesson(body);
    } catch (err) {
      showError({ message: `Request failed: ${err}` });
    } finally {
      setBusy(false);
    }
  }

  async function answer(button) {
    const lessonId = button.dataset.lesson;
    const response = await fetch(`/api/lessons/${lessonId}/answers`, {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({
        question_index: Number(button.dataset.question),
        option_index: Number(button.dataset.option),
      }),
    });
    const body = await response.json();
    if (!response.ok) {
      showError(body);
      return;
    }
    $(`question-${body.question.index}`).outerHTML = renderQuestion(lessonId, body.question);
    $('score').textContent = scoreLine(body.score);
    if (body.extracted_json) showJson(body.extracted_json);
  }

  async function init() {
    const options = await (await fetch('/api/options')).json();
    fillSelect($('audience'), options.audiences);
    fillSelect($('style'), options.styles);
    $('model').value = options.default_model;
    bindRange($('temperature'), options.temperature, $('temperature-value'), (v) => v.toFixed(2));
    bindRange($('max-tokens'), options.max_output_tokens, $('max-tokens-value'), (v) => String(v));

    $('topic').addEventListener('input', () => {
      $('generate').disabled = !$('topic').value.trim();
    });
    $('lesson-form').addEventListener('submit', generate);
    $('lesson').addEventListener('click', (event) => {
      const button = event.target.closest('button.option');
      if (button && !button.disabled) answer(button);
    });
  }

  init().catch((err) => showError({ message: `Failed to load options: ${err}` }));
</script>
</body>
</html>
"##;
