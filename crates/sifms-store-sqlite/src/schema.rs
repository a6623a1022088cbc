//! SQL schema for the SIFMS SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// The UNIQUE constraints are the backstop for the application-level
/// duplicate checks: two racing registrations or complaint submissions
/// cannot both insert.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS persons (
    person_id     TEXT PRIMARY KEY,
    reg_no        TEXT NOT NULL UNIQUE,  -- normalized upper-case
    surname       TEXT NOT NULL,
    first_name    TEXT NOT NULL,
    other_names   TEXT NOT NULL DEFAULT '',
    department    TEXT NOT NULL,
    faculty       TEXT NOT NULL,
    phone_number  TEXT NOT NULL UNIQUE,
    gender        TEXT NOT NULL,         -- 'male' | 'female'
    role          TEXT NOT NULL,         -- 'doi' | 'student'
    password_hash TEXT NOT NULL          -- argon2 PHC string
);

-- One row per complaint; responses are embedded as a JSON array.
-- Rows are never deleted; responses_json only ever grows.
CREATE TABLE IF NOT EXISTS complaints (
    complaint_id   TEXT PRIMARY KEY,
    student_reg_no TEXT NOT NULL,
    -- profile snapshot captured at submission time
    surname        TEXT NOT NULL,
    first_name     TEXT NOT NULL,
    other_names    TEXT NOT NULL DEFAULT '',
    department     TEXT NOT NULL,
    faculty        TEXT NOT NULL,
    phone_number   TEXT NOT NULL,
    gender         TEXT NOT NULL,
    role           TEXT NOT NULL,
    complaint      TEXT NOT NULL,
    submitted_at   TEXT NOT NULL,        -- ISO 8601 UTC; server-assigned
    responses_json TEXT NOT NULL DEFAULT '[]',
    UNIQUE (student_reg_no, complaint)
);

CREATE INDEX IF NOT EXISTS complaints_student_idx ON complaints(student_reg_no);

PRAGMA user_version = 1;
";
