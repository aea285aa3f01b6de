//! Template constants for the generated installer artifacts.
//!
//! [`SETUP_TEMPLATE`] is the interactive POSIX setup script that runs inside
//! the self-extracting archive on the target host. It must stay standalone:
//! plain sh, no bashisms, collaborators limited to useradd, systemctl,
//! openssl, chown, chmod, sed and tar.

/// Help/banner text, used both as the makeself `--help-header` and as an
/// in-payload banner file.
pub const HELP_TEMPLATE: &str = r#"{{release}} {{version}} self-extracting installer (linux-{{arch}})

This archive extracts itself to a temporary directory and runs the bundled
setup script, which asks for confirmation before changing anything on this
machine. Run with --noexec to extract the payload without installing.
"#;

/// The setup script template.
///
/// Every placeholder must have an entry in
/// [`SetupParams::substitution_table`](crate::setup::SetupParams::substitution_table);
/// the pairing is enforced by a test.
pub const SETUP_TEMPLATE: &str = r##"#!/bin/sh
# Interactive installer for {{release}} {{version}} (linux-{{arch}}).
# Runs from inside the self-extracting archive; the payload is the current
# working directory.

set -e
umask 022

RELEASE="{{release}}"
VERSION="{{version}}"
SERVICE_USER="{{service_user}}"
UNIT_NAME="{{unit_name}}"
DEFAULT_PREFIX="{{default_prefix}}"

PAYLOAD_DIR=$(pwd)

# ---------------------------------------------------------------------------
# Prompting

# Yes/no prompt. Non-interactive runs accept everything; an empty interactive
# answer means no. Re-prompts until the answer is recognized.
confirm() {
    if [ ! -t 0 ]; then
        return 0
    fi
    while :; do
        printf '%s [y/N] ' "$1"
        read -r answer || answer=no
        case "$answer" in
            [Yy]|[Yy][Ee][Ss]) return 0 ;;
            ''|[Nn]|[Nn][Oo]) return 1 ;;
            *) echo "Please answer yes or no." ;;
        esac
    done
}

abort() {
    echo "$1" >&2
    exit 1
}

# ---------------------------------------------------------------------------
# Decision record. Every environment probe happens up front, before anything
# on the system is touched.

if [ "$(id -u)" -eq 0 ]; then
    IS_ROOT=yes
else
    IS_ROOT=no
fi

if [ "$IS_ROOT" = no ]; then
    echo "You are not running this installer as a superuser."
    echo "$RELEASE can be installed without superuser rights, but it will not"
    echo "be registered as a system service."
    confirm "Continue with a non-superuser installation?" || abort "Aborting installation."
fi

if [ "$IS_ROOT" = yes ]; then
    PREFIX="$DEFAULT_PREFIX"
else
    SERVICE_USER=$(id -un)
    if confirm "Install under your home directory ($HOME)?"; then
        PREFIX="$HOME"
    else
        printf 'Installation prefix (absolute path): '
        read -r PREFIX || PREFIX=
        case "$PREFIX" in
            /*) ;;
            *) abort "Error: the installation prefix must be an absolute path." ;;
        esac
    fi
fi

DATA_DIR="$PREFIX/$RELEASE"
CODE_DIR="$PREFIX/$RELEASE-$VERSION"

if [ -d /run/systemd/system ]; then HAS_SYSTEMD=yes; else HAS_SYSTEMD=no; fi
if [ -d "$DATA_DIR" ]; then IS_UPGRADE=yes; else IS_UPGRADE=no; fi
if id "$SERVICE_USER" >/dev/null 2>&1; then USER_EXISTS=yes; else USER_EXISTS=no; fi

readonly IS_ROOT HAS_SYSTEMD IS_UPGRADE USER_EXISTS PREFIX DATA_DIR CODE_DIR

# ---------------------------------------------------------------------------
# Confirmation summary. Nothing has been changed yet.

echo
echo "$RELEASE $VERSION will be installed as follows:"
echo "  program files:    $CODE_DIR"
echo "  data and config:  $DATA_DIR"
if [ "$IS_UPGRADE" = yes ]; then
    echo "  existing data under $DATA_DIR is kept (upgrade)"
fi
if [ "$IS_ROOT" = yes ] && [ "$USER_EXISTS" = no ]; then
    echo "  the service user '$SERVICE_USER' will be created"
fi
if [ "$IS_ROOT" = yes ] && [ "$HAS_SYSTEMD" = yes ]; then
    echo "  the $UNIT_NAME systemd service will be installed"
fi
echo
confirm "Proceed with the installation?" || abort "Aborting installation."

# ---------------------------------------------------------------------------
# Mutating phase. An interrupt from here on can leave partial state; the
# uninstall notes written at the end list the manual cleanup commands.

if [ "$IS_ROOT" = yes ] && [ "$USER_EXISTS" = no ]; then
    echo "Creating service user '$SERVICE_USER'..."
    useradd --system --user-group --home-dir "$DATA_DIR" \
        --shell /usr/sbin/nologin "$SERVICE_USER"
fi

HOST_NAME=$(hostname -f 2>/dev/null || hostname 2>/dev/null || echo localhost)

echo "Installing files under $PREFIX..."
mkdir -p "$PREFIX"

# Data tree: never overwrite what an earlier install created.
(cd "$PAYLOAD_DIR" && tar cf - "$RELEASE") \
    | (cd "$PREFIX" && tar xf - --skip-old-files)

# Code tree: version-specific, replaced wholesale.
rm -rf "$CODE_DIR"
(cd "$PAYLOAD_DIR" && tar cf - "$RELEASE-$VERSION") | (cd "$PREFIX" && tar xf -)

# The control scripts and the service unit read their paths from this file
# instead of having them compiled in.
mkdir -p "$DATA_DIR/conf"
cat > "$DATA_DIR/conf/install.env" <<EOF
{{env_prefix}}_HOME=$CODE_DIR
{{env_prefix}}_DATA=$DATA_DIR
{{env_prefix}}_USER=$SERVICE_USER
EOF

if [ "$IS_ROOT" = yes ]; then
    chown -R "$SERVICE_USER:$SERVICE_USER" "$DATA_DIR"
    chmod 750 "$DATA_DIR"
    # The port-binding helper needs root; everything else runs as the
    # service user.
    chown root:root "$CODE_DIR/bin/portbind"
    chmod 4755 "$CODE_DIR/bin/portbind"
fi

if [ "$IS_UPGRADE" = no ]; then
    sed -i "s/^hostname = localhost$/hostname = $HOST_NAME/" "$DATA_DIR/conf/$RELEASE.conf"

    echo "Generating a self-signed TLS certificate for $HOST_NAME..."
    if openssl req -x509 -newkey rsa:4096 -nodes -days 3650 \
        -subj "/CN=$HOST_NAME" \
        -keyout "$DATA_DIR/conf/key.pem" -out "$DATA_DIR/conf/cert.pem" \
        >/dev/null 2>&1
    then
        chmod 600 "$DATA_DIR/conf/key.pem"
        if [ "$IS_ROOT" = yes ]; then
            chown "$SERVICE_USER:$SERVICE_USER" \
                "$DATA_DIR/conf/key.pem" "$DATA_DIR/conf/cert.pem"
        fi
    else
        echo "Warning: TLS certificate generation failed; $RELEASE will start" >&2
        echo "without TLS until a certificate is placed in $DATA_DIR/conf." >&2
    fi
fi

if [ "$IS_ROOT" = yes ] && [ "$HAS_SYSTEMD" = yes ]; then
    echo "Registering the $UNIT_NAME service..."
    cat > "/etc/systemd/system/$UNIT_NAME" <<EOF
[Unit]
Description=$RELEASE server
After=network-online.target

[Service]
Type=simple
User=$SERVICE_USER
EnvironmentFile=$DATA_DIR/conf/install.env
ExecStart=$CODE_DIR/bin/$RELEASE --data-dir $DATA_DIR
Restart=on-failure

[Install]
WantedBy=multi-user.target
EOF
    systemctl daemon-reload
    if [ "$IS_UPGRADE" = no ]; then
        systemctl enable --now "$UNIT_NAME"
    fi
elif [ "$IS_ROOT" = yes ]; then
    echo "systemd was not detected. To start $RELEASE at boot, arrange for"
    echo "  $CODE_DIR/bin/$RELEASE --data-dir $DATA_DIR"
    echo "to run as the user '$SERVICE_USER'."
else
    echo "Not running as superuser; no system service was installed."
    echo "Start $RELEASE manually with:"
    echo "  $CODE_DIR/bin/$RELEASE --data-dir $DATA_DIR"
fi

UNINSTALL_FILE="$DATA_DIR/UNINSTALL.txt"
{
    echo "# Commands that reverse this $RELEASE $VERSION installation."
    echo "# Review before running; data under $DATA_DIR is deleted for good."
    if [ "$IS_ROOT" = yes ] && [ "$HAS_SYSTEMD" = yes ]; then
        echo "systemctl disable --now $UNIT_NAME"
        echo "rm /etc/systemd/system/$UNIT_NAME"
        echo "systemctl daemon-reload"
    fi
    echo "rm -rf $CODE_DIR"
    echo "rm -rf $DATA_DIR"
    if [ "$IS_ROOT" = yes ]; then
        echo "userdel $SERVICE_USER"
    fi
} > "$UNINSTALL_FILE"

echo
if [ "$IS_UPGRADE" = yes ]; then
    echo "$RELEASE has been upgraded to $VERSION."
    echo "Read $CODE_DIR/docs/UPGRADING.md for version-specific notes, then"
    echo "restart the service, e.g.: systemctl restart $UNIT_NAME"
else
    echo "$RELEASE $VERSION has been installed."
    echo "See $CODE_DIR/docs/ADMINISTRATION.md to get started."
fi
echo "Manual uninstall commands were written to $UNINSTALL_FILE."
"##;
