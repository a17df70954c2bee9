use crate::libarena::question::{Difficulty, NewQuestion, Question};
use log::{debug, error, info, warn};
use rusqlite::types::Type;
use rusqlite::{params, Connection, DatabaseName, OptionalExtension, Result, Row};
use std::path::Path;
use std::time::Instant;

impl Question {
    pub fn insert(connection: &Connection, src: &NewQuestion) -> Result<Question> {
        let options = serde_json::to_string(&src.options)
            .map_err(|err| rusqlite::Error::ToSqlConversionFailure(Box::new(err)))?;
        match connection.execute(
            "INSERT INTO \
            Question(text, options, correctAnswer, difficulty, imageUrl) \
            VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                src.text,
                options,
                src.correct_answer,
                src.difficulty.as_str(),
                src.image_url
            ],
        ) {
            Ok(_) => {
                let id = connection.last_insert_rowid();
                debug!("[DB] Created new Question {} ({})", id, src.difficulty);
                Ok(Question {
                    id,
                    text: src.text.clone(),
                    options: src.options.clone(),
                    correct_answer: src.correct_answer.clone(),
                    difficulty: src.difficulty,
                    image_url: src.image_url.clone(),
                })
            }
            Err(err) => {
                error!("[DB] Error while creating new Question: {:?}", err);
                Err(err)
            }
        }
    }

    fn from_row(row: &Row) -> Result<Question> {
        let options: String = row.get(2)?;
        let options = serde_json::from_str(&options)
            .map_err(|err| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(err)))?;
        let difficulty: String = row.get(4)?;
        let difficulty = difficulty
            .parse::<Difficulty>()
            .map_err(|err| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(err)))?;

        Ok(Question {
            id: row.get(0)?,
            text: row.get(1)?,
            options,
            correct_answer: row.get(3)?,
            difficulty,
            image_url: row.get(5)?,
        })
    }

    pub fn get_all(connection: &Connection) -> Result<Vec<Question>> {
        let mut statement = connection.prepare(
            "SELECT id, text, options, correctAnswer, difficulty, imageUrl \
            FROM Question ORDER BY id",
        )?;
        let rows = statement.query_map([], |row| Self::from_row(row))?;

        rows.collect()
    }

    pub fn get_by_id(connection: &Connection, id: i64) -> Result<Option<Question>> {
        let mut statement = connection.prepare(
            "SELECT id, text, options, correctAnswer, difficulty, imageUrl \
            FROM Question WHERE id = :id LIMIT 1",
        )?;
        statement
            .query_row(&[(":id", &id)], |row| Self::from_row(row))
            .optional()
    }

    pub fn count(connection: &Connection) -> Result<u64> {
        let count: i64 =
            connection.query_row("SELECT COUNT(*) FROM Question", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    pub fn get_at_offset(connection: &Connection, offset: u64) -> Result<Option<Question>> {
        let mut statement = connection.prepare(
            "SELECT id, text, options, correctAnswer, difficulty, imageUrl \
            FROM Question ORDER BY id LIMIT 1 OFFSET :offset",
        )?;
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);
        statement
            .query_row(&[(":offset", &offset)], |row| Self::from_row(row))
            .optional()
    }
}

pub fn create_or_open(src: &Path) -> Result<Connection> {
    if src.exists() {
        info!("[DB] Opening existing Database");
        init_db(open_db(src)?)
    } else {
        info!("[DB] Creating new Database");
        create_db(src)
    }
}

pub fn create_db(dest: &Path) -> Result<Connection> {
    let now = Instant::now();
    let db = init_db(Connection::open_in_memory()?)?;
    match db.backup(DatabaseName::Main, dest, None) {
        Ok(_) => {
            debug!(
                "[DB] Creating and Saving took {} ms.",
                now.elapsed().as_millis()
            );
            // keep working against the file, not the in-memory copy
            close_db(db)?;
            open_db(dest)
        }
        Err(err) => {
            warn!("[DB] Failed to create database file: {}", err);
            close_db(db)?;
            Err(err)
        }
    }
}

pub fn open_db(src: &Path) -> Result<Connection> {
    let now = Instant::now();
    let db = Connection::open(src)?;
    debug!("[DB] Opening took {} ms.", now.elapsed().as_millis());
    Ok(db)
}

pub fn open_in_memory() -> Result<Connection> {
    init_db(Connection::open_in_memory()?)
}

pub fn close_db(connection: Connection) -> Result<()> {
    info!("[DB] Closing Database");
    let mut connection = connection;
    for attempt in 1..=3 {
        match connection.close() {
            Ok(_) => return Ok(()),
            Err((conn, err)) => {
                if attempt == 3 {
                    error!("[DB] Cannot close connection: {err}. Giving up.");
                    return Err(err);
                }
                error!("[DB] Cannot close connection. Retrying {attempt}/2...");
                connection = conn;
            }
        }
    }
    Ok(())
}

fn init_db(conn: Connection) -> Result<Connection> {
    info!("[DB INIT] Creating tables");
    conn.execute(
        "CREATE TABLE IF NOT EXISTS Question (
              id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
              text TEXT NOT NULL,
              options TEXT NOT NULL,
              correctAnswer TEXT NOT NULL,
              difficulty TEXT NOT NULL DEFAULT 'easy',
              imageUrl TEXT
            )",
        (),
    )?;
    info!("[DB INIT] Created table Question");
    info!("[DB INIT] Database Creation Successful!");

    Ok(conn)
}
