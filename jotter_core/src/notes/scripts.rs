// JXA generation - one script builder per Notes.app operation
// User values are embedded as JSON string literals so they cannot break out
// of the script; note bodies are HTML because Notes renders them that way

/// Shared helpers prepended to every script. Scripts return their result via
/// `JSON.stringify`; the catch-all in the epilogue turns stray exceptions
/// into `{"error": ...}` payloads instead of osascript's plain-text stderr.
const PROLOGUE: &str = r#"(() => {
  const app = Application("Notes");
  const ownerOf = (item) => {
    let folder = "";
    let account = "";
    try {
      const c = item.container();
      folder = c.name();
      try { account = c.container().name(); } catch (e) {}
    } catch (e) {}
    return { folder: folder, account: account };
  };
  const noteJson = (note, folder, account) => ({
    id: note.id(),
    title: note.name(),
    body: note.plaintext(),
    created: note.creationDate(),
    modified: note.modificationDate(),
    folder: folder,
    account: account
  });
  const noteById = (id) => {
    const note = app.notes.byId(id);
    try {
      note.name();
    } catch (e) {
      return null;
    }
    return note;
  };
  const findFolder = (name) => {
    const accounts = app.accounts;
    for (let a = 0; a < accounts.length; a++) {
      const folders = accounts[a].folders;
      for (let f = 0; f < folders.length; f++) {
        if (folders[f].name() === name) {
          return { folder: folders[f], account: accounts[a].name() };
        }
      }
    }
    return null;
  };
  const collect = (folder, folderName, accountName, withBody) => {
    const notes = folder.notes;
    const ids = notes.id();
    const titles = notes.name();
    const created = notes.creationDate();
    const modified = notes.modificationDate();
    const bodies = withBody ? notes.plaintext() : null;
    const out = [];
    for (let i = 0; i < ids.length; i++) {
      const rec = {
        id: ids[i],
        title: titles[i],
        created: created[i],
        modified: modified[i],
        folder: folderName,
        account: accountName
      };
      if (bodies !== null) { rec.body = bodies[i]; }
      out.push(rec);
    }
    return out;
  };
  try {
"#;

const EPILOGUE: &str = r#"  } catch (e) {
    return JSON.stringify({ error: { message: String(e), kind: "script" } });
  }
})();
"#;

fn wrap(body: &str) -> String {
    format!("{}{}{}", PROLOGUE, body, EPILOGUE)
}

/// Quote a value as a JavaScript string literal.
///
/// JSON escaping covers quotes, backslashes, newlines and control
/// characters; U+2028/U+2029 are JSON-legal but rejected by some JS string
/// literal grammars, so they are escaped on top.
pub fn js_quote(value: &str) -> String {
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

/// Encode plain text as a Notes HTML body fragment.
pub fn html_body(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    html_escape::encode_text(&normalized).replace('\n', "<br>")
}

// Notes derives the note title from the first line of the HTML body.
fn titled_body(title: &str, body: &str) -> String {
    format!(
        "<h1>{}</h1><br>{}",
        html_escape::encode_text(title),
        html_body(body)
    )
}

fn fetch_notes(folder: Option<&str>, with_bodies: bool) -> String {
    const ALL: &str = r#"    const notes = [];
    const accounts = app.accounts;
    for (let a = 0; a < accounts.length; a++) {
      const accountName = accounts[a].name();
      const folders = accounts[a].folders;
      for (let f = 0; f < folders.length; f++) {
        const pack = collect(folders[f], folders[f].name(), accountName, withBodies);
        for (let i = 0; i < pack.length; i++) { notes.push(pack[i]); }
      }
    }
    return JSON.stringify({ notes: notes });
"#;
    const SCOPED: &str = r#"    const hit = findFolder(target);
    if (hit === null) {
      return JSON.stringify({ error: { message: "No folder named " + target, kind: "folder_not_found" } });
    }
    const notes = collect(hit.folder, target, hit.account, withBodies);
    return JSON.stringify({ notes: notes });
"#;

    let flag = format!("    const withBodies = {};\n", with_bodies);
    match folder {
        Some(name) => wrap(&format!(
            "{}    const target = {};\n{}",
            flag,
            js_quote(name),
            SCOPED
        )),
        None => wrap(&format!("{}{}", flag, ALL)),
    }
}

/// Summaries (no bodies) of every note, optionally scoped to one folder.
pub fn list_notes(folder: Option<&str>) -> String {
    fetch_notes(folder, false)
}

/// Like `list_notes` but including plaintext bodies, for host-side matching.
pub fn search_notes(folder: Option<&str>) -> String {
    fetch_notes(folder, true)
}

/// Full record for a single note.
pub fn get_note(note_id: &str) -> String {
    const BODY: &str = r#"    const note = noteById(noteId);
    if (note === null) {
      return JSON.stringify({ error: { message: "No note with id " + noteId, kind: "note_not_found" } });
    }
    const owner = ownerOf(note);
    return JSON.stringify({ note: noteJson(note, owner.folder, owner.account) });
"#;
    wrap(&format!("    const noteId = {};\n{}", js_quote(note_id), BODY))
}

/// Create a note in the named folder, or in the default account's default
/// folder when none is given. Echoes the new record.
pub fn create_note(title: &str, body: &str, folder: Option<&str>) -> String {
    const IN_FOLDER: &str = r#"    const hit = findFolder(target);
    if (hit === null) {
      return JSON.stringify({ error: { message: "No folder named " + target, kind: "folder_not_found" } });
    }
    const note = app.Note({ body: html });
    hit.folder.notes.push(note);
    return JSON.stringify({ note: noteJson(note, target, hit.account) });
"#;
    const IN_DEFAULT: &str = r#"    const note = app.Note({ body: html });
    const account = app.defaultAccount();
    account.notes.push(note);
    const owner = ownerOf(note);
    return JSON.stringify({ note: noteJson(note, owner.folder, owner.account) });
"#;

    let html = js_quote(&titled_body(title, body));
    match folder {
        Some(name) => wrap(&format!(
            "    const html = {};\n    const target = {};\n{}",
            html,
            js_quote(name),
            IN_FOLDER
        )),
        None => wrap(&format!("    const html = {};\n{}", html, IN_DEFAULT)),
    }
}

/// Replace a note's body. Without an explicit title the first line of the
/// new body becomes the title, so callers that want to keep the old title
/// pass it back in.
pub fn update_note(note_id: &str, body: &str, title: Option<&str>) -> String {
    const BODY: &str = r#"    const note = noteById(noteId);
    if (note === null) {
      return JSON.stringify({ error: { message: "No note with id " + noteId, kind: "note_not_found" } });
    }
    note.body = html;
    const owner = ownerOf(note);
    return JSON.stringify({ note: noteJson(note, owner.folder, owner.account) });
"#;
    let html = match title {
        Some(t) => titled_body(t, body),
        None => html_body(body),
    };
    wrap(&format!(
        "    const noteId = {};\n    const html = {};\n{}",
        js_quote(note_id),
        js_quote(&html),
        BODY
    ))
}

/// Append text to the end of a note's body.
pub fn append_note(note_id: &str, text: &str) -> String {
    const BODY: &str = r#"    const note = noteById(noteId);
    if (note === null) {
      return JSON.stringify({ error: { message: "No note with id " + noteId, kind: "note_not_found" } });
    }
    note.body = note.body() + "<br>" + html;
    const owner = ownerOf(note);
    return JSON.stringify({ note: noteJson(note, owner.folder, owner.account) });
"#;
    wrap(&format!(
        "    const noteId = {};\n    const html = {};\n{}",
        js_quote(note_id),
        js_quote(&html_body(text)),
        BODY
    ))
}

/// Delete a note. Notes moves it to Recently Deleted rather than destroying it.
pub fn delete_note(note_id: &str) -> String {
    const BODY: &str = r#"    const note = noteById(noteId);
    if (note === null) {
      return JSON.stringify({ error: { message: "No note with id " + noteId, kind: "note_not_found" } });
    }
    app.delete(note);
    return JSON.stringify({ deleted: true, note_id: noteId });
"#;
    wrap(&format!("    const noteId = {};\n{}", js_quote(note_id), BODY))
}

/// Move a note into another folder. Echoes the updated record.
pub fn move_note(note_id: &str, folder: &str) -> String {
    const BODY: &str = r#"    const note = noteById(noteId);
    if (note === null) {
      return JSON.stringify({ error: { message: "No note with id " + noteId, kind: "note_not_found" } });
    }
    const hit = findFolder(target);
    if (hit === null) {
      return JSON.stringify({ error: { message: "No folder named " + target, kind: "folder_not_found" } });
    }
    app.move(note, { to: hit.folder });
    return JSON.stringify({ note: noteJson(note, target, hit.account) });
"#;
    wrap(&format!(
        "    const noteId = {};\n    const target = {};\n{}",
        js_quote(note_id),
        js_quote(folder),
        BODY
    ))
}

/// Name, id, account and note count for every folder in every account.
pub fn list_folders() -> String {
    const BODY: &str = r#"    const folders = [];
    const accounts = app.accounts;
    for (let a = 0; a < accounts.length; a++) {
      const accountName = accounts[a].name();
      const accFolders = accounts[a].folders;
      for (let f = 0; f < accFolders.length; f++) {
        folders.push({
          id: accFolders[f].id(),
          name: accFolders[f].name(),
          account: accountName,
          note_count: accFolders[f].notes.length
        });
      }
    }
    return JSON.stringify({ folders: folders });
"#;
    wrap(BODY)
}

/// Create a folder in the default account.
pub fn create_folder(name: &str) -> String {
    const BODY: &str = r#"    const folder = app.Folder({ name: name });
    const account = app.defaultAccount();
    account.folders.push(folder);
    return JSON.stringify({ folder: { id: folder.id(), name: folder.name(), account: account.name(), note_count: 0 } });
"#;
    wrap(&format!("    const name = {};\n{}", js_quote(name), BODY))
}
