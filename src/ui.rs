pub fn render_index() -> String {
    INDEX_HTML.to_string()
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Energy production Dashboard</title>
  <script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
  <style>
    :root {
      --bg: #1f2630;
      --card: #252e3f;
      --ink: #f4f4f4;
      --muted: #9aa5b8;
      --accent: #7fcdbb;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 18px;
    }

    .pretty_box {
      background: var(--card);
      border-radius: 10px;
      margin: 8px;
      padding: 14px;
      box-shadow: 0 4px 18px rgba(0, 0, 0, 0.35);
    }

    .row {
      display: flex;
    }

    label {
      display: block;
      margin: 12px 0 4px;
      color: var(--muted);
    }

    select {
      width: 100%;
      background: #1a202b;
      color: var(--ink);
      border: 1px solid #3c4659;
      border-radius: 6px;
      padding: 4px;
    }

    input[type="range"] {
      width: 100%;
    }

    .labels {
      display: flex;
      flex-wrap: wrap;
    }

    .box_emissions {
      flex: 1 1 22%;
      background: var(--card);
      border-left: 4px solid var(--accent);
      border-radius: 6px;
      margin: 6px;
      padding: 10px;
      font-size: 13px;
    }

    #status {
      min-height: 1.2em;
      color: #ff8a80;
    }

    footer {
      display: flex;
      justify-content: space-between;
      font-size: 14px;
      color: var(--muted);
    }

    footer a {
      color: var(--accent);
    }
  </style>
</head>
<body>
  <div class="pretty_box">
    <h1>Energy production Dashboard</h1>
  </div>
  <div class="row">
    <div class="pretty_box" style="width: 30%">
      <label for="country_drop">Country Choice</label>
      <select id="country_drop" multiple size="8"></select>
      <label for="energy_options">Energy Choice</label>
      <select id="energy_options"></select>
      <label for="sector_option">Sector Choice</label>
      <select id="sector_option" multiple size="8"></select>
      <label for="year_slider">Year Slider: <span id="year_value"></span></label>
      <input id="year_slider" type="range" step="1" list="year_marks" />
      <datalist id="year_marks"></datalist>
      <label>Linear Log</label>
      <div id="lin_log"></div>
      <label>Projection</label>
      <div id="projection"></div>
      <p id="status"></p>
    </div>
    <div style="width: 70%">
      <div class="labels" id="labels"></div>
      <div class="pretty_box"><div id="choropleth"></div></div>
    </div>
  </div>
  <div class="row">
    <div class="pretty_box" style="width: 50%"><div id="bar_graph"></div></div>
    <div class="pretty_box" style="width: 50%"><div id="aggregate_graph"></div></div>
  </div>
  <footer class="pretty_box">
    <span>Energy production by country, sector and year</span>
    <span>Sources <a href="https://ourworldindata.org/" target="_blank">Our World in Data</a></span>
  </footer>

  <script>
    const $ = (id) => document.getElementById(id);
    const statusEl = $('status');
    const dark = {
      paper_bgcolor: 'rgba(0,0,0,0)',
      plot_bgcolor: 'rgba(0,0,0,0)',
      font: { color: 'white' },
    };

    const setStatus = (message) => {
      statusEl.textContent = message || '';
    };

    const fillSelect = (el, options, selected) => {
      el.innerHTML = '';
      for (const option of options) {
        const node = document.createElement('option');
        node.value = option.value;
        node.textContent = option.label;
        node.selected = selected.includes(option.value);
        el.appendChild(node);
      }
    };

    const fillRadios = (el, name, choices, checked) => {
      el.innerHTML = '';
      for (const choice of choices) {
        const input = document.createElement('input');
        input.type = 'radio';
        input.name = name;
        input.value = choice.value;
        input.checked = choice.value === checked;
        input.addEventListener('change', refreshFigures);
        el.appendChild(input);
        el.appendChild(document.createTextNode(` ${choice.label} `));
      }
    };

    const selectedValues = (el) => Array.from(el.selectedOptions).map((o) => o.value);
    const radioValue = (name) =>
      Number(document.querySelector(`input[name="${name}"]:checked`).value);

    const currentSelection = () => ({
      year: Number($('year_slider').value),
      countries: selectedValues($('country_drop')),
      energy: $('energy_options').value,
      scale: radioValue('lin_log'),
      projection: radioValue('projection'),
      sectors: selectedValues($('sector_option')),
    });

    const postJson = async (url, body) => {
      const response = await fetch(url, {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(body),
      });
      if (!response.ok) {
        throw new Error(await response.text());
      }
      return response.json();
    };

    const drawBar = (spec) => {
      const traces = spec.series.map((s) => ({
        type: 'bar',
        name: s.country,
        x: s.points.map((p) => p[0]),
        y: s.points.map((p) => p[1]),
      }));
      Plotly.react('bar_graph', traces, {
        ...dark,
        title: { text: spec.title },
        yaxis: { title: spec.y_axis.title, type: spec.y_axis.type },
      });
    };

    const drawChoropleth = (spec) => {
      const trace = {
        type: 'choropleth',
        locations: spec.points.map((p) => p.entity),
        locationmode: spec.location_mode,
        z: spec.points.map((p) => p.log_value),
        text: spec.points.map((p) => p.entity),
        colorscale: spec.color_scale,
        colorbar: { title: spec.colorbar_title },
        hovertemplate: spec.hover_template,
        name: '',
      };
      Plotly.react('choropleth', [trace], {
        ...dark,
        geo: {
          scope: 'world',
          projection: { type: spec.projection },
          landcolor: 'white',
          lakecolor: 'white',
          showocean: true,
          oceancolor: 'azure',
          bgcolor: '#f9f9f9',
        },
        title: { text: spec.title, x: 0.5 },
      });
    };

    const drawScatter = (spec) => {
      const traces = spec.series.map((s) => ({
        type: 'scatter',
        mode: spec.mode,
        name: s.sector,
        x: s.points.map((p) => p[0]),
        y: s.points.map((p) => p[1]),
      }));
      Plotly.react('aggregate_graph', traces, {
        ...dark,
        title: { text: spec.title },
        xaxis: { title: spec.x_axis.title },
        yaxis: { title: spec.y_axis.title, type: spec.y_axis.type },
      });
    };

    const drawers = { bar: drawBar, choropleth: drawChoropleth, scatter: drawScatter };

    const clearCharts = () => {
      for (const id of ['bar_graph', 'choropleth', 'aggregate_graph']) {
        Plotly.react(id, [], { ...dark, title: { text: 'No data' } });
      }
    };

    const renderLabels = (labels) => {
      const container = $('labels');
      container.innerHTML = '';
      for (const item of labels) {
        const node = document.createElement('div');
        node.className = 'box_emissions';
        node.textContent = item.label;
        container.appendChild(node);
      }
    };

    const refreshFigures = async () => {
      try {
        const data = await postJson('/api/figures', currentSelection());
        for (const figure of data.figures) {
          drawers[figure.kind](figure);
        }
        setStatus('');
      } catch (err) {
        clearCharts();
        setStatus(err.message);
      }
    };

    const refreshLabels = async () => {
      const { countries, year } = currentSelection();
      try {
        const data = await postJson('/api/indicators', { countries, year });
        renderLabels(data.labels);
      } catch (err) {
        renderLabels([{ label: `No aggregated data for ${year}` }]);
      }
    };

    const refreshAll = () => {
      $('year_value').textContent = $('year_slider').value;
      refreshFigures();
      refreshLabels();
    };

    const init = async () => {
      const response = await fetch('/api/options');
      const options = await response.json();
      const defaults = options.defaults;

      fillSelect(
        $('country_drop'),
        options.countries.map((c) => ({ label: c, value: c })),
        defaults.countries,
      );
      fillSelect($('energy_options'), options.energy_types, [defaults.energy]);
      fillSelect($('sector_option'), options.sectors, defaults.sectors);
      fillRadios($('lin_log'), 'lin_log', options.scales, defaults.scale);
      fillRadios($('projection'), 'projection', options.projections, defaults.projection);

      const slider = $('year_slider');
      slider.min = options.year_min;
      slider.max = options.year_max;
      slider.value = defaults.year;
      $('year_marks').innerHTML = options.year_marks
        .map((y) => `<option value="${y}" label="${y}"></option>`)
        .join('');

      for (const id of ['country_drop', 'energy_options', 'sector_option', 'year_slider']) {
        $(id).addEventListener('change', refreshAll);
      }

      refreshAll();
    };

    init().catch((err) => setStatus(err.message));
  </script>
</body>
</html>
"#;
