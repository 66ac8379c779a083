//! iCalendar fixtures and load/expand tests over whole documents.
